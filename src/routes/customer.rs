use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::domain::types::CustomerId;
use crate::dto::customer::{CustomerCreateView, CustomerPageParams, CustomerSummaryView};
use crate::pagination::{DEFAULT_LINES_PER_PAGE, DEFAULT_PAGE};
use crate::repository::DieselRepository;
use crate::routes::run_blocking;
use crate::services::ServiceError;
use crate::services::customer as customer_service;

const DEFAULT_DIRECTION: &str = "ASC";
const DEFAULT_ORDER_BY: &str = "nome";

/// `{current request URL without query}/{id}`.
fn location_for(req: &HttpRequest, id: i32) -> String {
    let mut url = req.full_url();
    url.set_query(None);
    let path = format!("{}/{id}", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.to_string()
}

#[get("/page")]
pub async fn list_customers_page(
    params: web::Query<CustomerPageParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let params = params.into_inner();

    let page = run_blocking(move || {
        customer_service::find_customers_page(
            repo.get_ref(),
            params.page.unwrap_or(DEFAULT_PAGE),
            params.lines_per_page.unwrap_or(DEFAULT_LINES_PER_PAGE),
            params.direction.as_deref().unwrap_or(DEFAULT_DIRECTION),
            params.order_by.as_deref().unwrap_or(DEFAULT_ORDER_BY),
        )
    })
    .await?;

    Ok(HttpResponse::Ok().json(page.map(CustomerSummaryView::from)))
}

#[get("")]
pub async fn list_customers(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customers =
        run_blocking(move || customer_service::find_all_customers(repo.get_ref())).await?;

    let views: Vec<CustomerSummaryView> = customers.iter().map(CustomerSummaryView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

#[get("/{id}")]
pub async fn show_customer(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let id = id.into_inner();

    let customer =
        run_blocking(move || customer_service::find_customer(repo.get_ref(), id)).await?;

    Ok(HttpResponse::Ok().json(customer))
}

#[post("")]
pub async fn create_customer(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(view): web::Json<CustomerCreateView>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(e) = view.validate() {
        log::error!("Failed to validate customer: {e}");
        return Err(ServiceError::Validation(e));
    }

    let customer = run_blocking(move || {
        let new_customer = customer_service::from_create_view(view)?;
        customer_service::insert_customer(repo.get_ref(), &new_customer)
    })
    .await?;

    log::info!("Created customer {}", customer.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location_for(&req, customer.id.get())))
        .finish())
}

#[put("/{id}")]
pub async fn update_customer(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(view): web::Json<CustomerSummaryView>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(e) = view.validate() {
        log::error!("Failed to validate customer: {e}");
        return Err(ServiceError::Validation(e));
    }

    let id = id.into_inner();

    run_blocking(move || {
        let mut changes = customer_service::from_summary_view(&view)?;
        changes.id = Some(CustomerId::new(id).map_err(|_| customer_service::not_found(id))?);
        customer_service::update_customer(repo.get_ref(), &changes)
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[delete("/{id}")]
pub async fn delete_customer(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let id = id.into_inner();

    run_blocking(move || customer_service::delete_customer(repo.get_ref(), id)).await?;

    Ok(HttpResponse::NoContent().finish())
}
