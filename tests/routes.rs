use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use tqi_clientes::repository::DieselRepository;

mod common;

fn create_payload(nome: &str, email: &str, cpf: &str) -> Value {
    json!({
        "id": 99,
        "nome": nome,
        "email": email,
        "cpf": cpf,
        "rg": "MG-12.345.678",
        "renda": 4200.0,
        "senha": "segredo",
        "logradouro": "Rua A",
        "numero": "10",
        "bairro": "Centro",
        "cep": "38400000",
        "telefone1": "34 9999-0001",
        "telefone2": "",
        "telefone3": "34 3222-0001",
        "cidadeId": 1
    })
}

macro_rules! init_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(DieselRepository::new($test_db.pool().clone())))
                .configure(tqi_clientes::routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_create_then_show_customer() {
    let test_db = common::TestDb::new("test_routes_create.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(create_payload("Maria Silva", "maria@example.com", "529.982.247-25"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.ends_with("/clientes/1"));

    let req = test::TestRequest::get().uri("/clientes/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["nome"], "Maria Silva");
    assert_eq!(body["cpf"], "52998224725");
    // The blank `telefone2` counts as absent.
    assert_eq!(body["telefones"], json!(["34 9999-0001", "34 3222-0001"]));
    assert_eq!(body["enderecos"][0]["cidade"]["nome"], "Uberlândia");
    assert!(body.get("senha").is_none());
}

#[actix_web::test]
async fn test_show_missing_customer_returns_not_found() {
    let test_db = common::TestDb::new("test_routes_missing.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::get().uri("/clientes/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert!(body["message"].as_str().unwrap().ends_with("Id: 42"));
}

#[actix_web::test]
async fn test_create_rejects_invalid_payloads() {
    let test_db = common::TestDb::new("test_routes_invalid.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(create_payload("Maria Silva", "not-an-email", "123.456.789-00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"nome\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json({
            let mut payload =
                create_payload("Maria Silva", "maria@example.com", "529.982.247-25");
            payload["cidadeId"] = json!(999);
            payload
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_update_customer_changes_name_and_email_only() {
    let test_db = common::TestDb::new("test_routes_update.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(create_payload("Maria Silva", "maria@example.com", "529.982.247-25"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::put()
        .uri("/clientes/1")
        .set_json(json!({"id": 7, "nome": "Maria S. Costa", "email": "costa@example.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/clientes/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["nome"], "Maria S. Costa");
    assert_eq!(body["email"], "costa@example.com");
    assert_eq!(body["cpf"], "52998224725");
    assert_eq!(body["renda"], 4200.0);

    let req = test::TestRequest::put()
        .uri("/clientes/5")
        .set_json(json!({"nome": "Ninguém", "email": "ninguem@example.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_customer() {
    let test_db = common::TestDb::new("test_routes_delete.db");
    let app = init_app!(test_db);

    for (nome, email, cpf) in [
        ("Maria Silva", "maria@example.com", "529.982.247-25"),
        ("João Souza", "joao@example.com", "111.444.777-35"),
    ] {
        let req = test::TestRequest::post()
            .uri("/clientes")
            .set_json(create_payload(nome, email, cpf))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }
    common::add_loan(test_db.pool(), 2);

    let req = test::TestRequest::delete().uri("/clientes/1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    let req = test::TestRequest::get().uri("/clientes/1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/clientes/2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Não é possível excluir um cliente porque há empréstimos relacionados."
    );

    let req = test::TestRequest::delete().uri("/clientes/3").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_and_page_customers() {
    let test_db = common::TestDb::new("test_routes_page.db");
    let app = init_app!(test_db);

    for (nome, email, cpf) in [
        ("Maria Silva", "maria@example.com", "529.982.247-25"),
        ("João Souza", "joao@example.com", "111.444.777-35"),
    ] {
        let req = test::TestRequest::post()
            .uri("/clientes")
            .set_json(create_payload(nome, email, cpf))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/clientes").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].get("cpf").is_none());

    let req = test::TestRequest::get().uri("/clientes/page").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["totalElements"], 2);
    assert_eq!(body["size"], 24);
    assert_eq!(body["number"], 0);
    assert_eq!(body["content"][0]["nome"], "João Souza");

    let req = test::TestRequest::get()
        .uri("/clientes/page?page=0&linesPerPage=1&direction=DESC&orderBy=id")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["content"][0]["id"], 2);

    let req = test::TestRequest::get()
        .uri("/clientes/page?direction=invalid")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/clientes/page?orderBy=senha")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_page_far_past_the_end_is_empty() {
    let test_db = common::TestDb::new("test_routes_far_page.db");
    let app = init_app!(test_db);

    for (nome, email, cpf) in [
        ("Maria Silva", "maria@example.com", "529.982.247-25"),
        ("João Souza", "joao@example.com", "111.444.777-35"),
    ] {
        let req = test::TestRequest::post()
            .uri("/clientes")
            .set_json(create_payload(nome, email, cpf))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/clientes/page?page=400000000000000000&linesPerPage=24")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["totalElements"], 2);
    assert_eq!(body["numberOfElements"], 0);
    assert_eq!(body["content"], json!([]));

    let req = test::TestRequest::get()
        .uri("/clientes/page?page=18446744073709551615")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["content"], json!([]));
    assert_eq!(body["last"], true);

    let req = test::TestRequest::get()
        .uri("/clientes/page?page=1&linesPerPage=18446744073709551615")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["content"], json!([]));

    let req = test::TestRequest::get()
        .uri("/clientes/page?linesPerPage=18446744073709551615")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["numberOfElements"], 2);
}
