use diesel::prelude::*;

use crate::domain::location::{City as DomainCity, State as DomainState};
use crate::domain::types::{CityId, StateId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::states)]
pub struct State {
    pub id: i32,
    pub name: String,
    pub abbreviation: String,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::cities)]
#[diesel(belongs_to(State, foreign_key = state_id))]
pub struct City {
    pub id: i32,
    pub name: String,
    pub state_id: i32,
}

impl TryFrom<State> for DomainState {
    type Error = TypeConstraintError;

    fn try_from(state: State) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StateId::new(state.id)?,
            name: state.name,
            abbreviation: state.abbreviation,
        })
    }
}

impl City {
    pub fn into_domain(self, state: Option<DomainState>) -> Result<DomainCity, TypeConstraintError> {
        Ok(DomainCity {
            id: CityId::new(self.id)?,
            name: self.name,
            state,
        })
    }
}
