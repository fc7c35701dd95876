//! End-to-end HTTP scenarios over the in-memory stores.
//!
//! Requests pass through the full middleware stack (trace ids, cookie
//! sessions, JSON extractor settings) and the real domain services.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use pantry::Trace;
use pantry::domain::ports::{FIXTURE_USER_ID, LoginService};
use pantry::domain::{Error, LoginCredentials, TRACE_ID_HEADER, UserId};
use pantry::inbound::http::configure;
use pantry::outbound::memory::{InMemoryIngredientRepository, InMemoryShoppingListRepository};
use rstest::rstest;
use serde_json::{Value, json};

mod support;

const OTHER_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Two accounts so ownership checks can be exercised.
struct TwoAccountLogin;

#[async_trait]
impl LoginService for TwoAccountLogin {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let id = match (credentials.username(), credentials.password()) {
            ("admin", "password") => FIXTURE_USER_ID,
            ("guest", "password") => OTHER_USER_ID,
            _ => return Err(Error::unauthorized("invalid credentials")),
        };
        UserId::new(id).map_err(|err| Error::internal(err.to_string()))
    }
}

async fn app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let ingredients = Arc::new(InMemoryIngredientRepository::new());
    let shopping_lists = Arc::new(InMemoryShoppingListRepository::new(ingredients.clone()));
    let state = support::http_state(Arc::new(TwoAccountLogin), shopping_lists, ingredients);
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(support::session_middleware())
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

async fn send<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

async fn sign_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({"username": username, "password": "password"}))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

async fn create_ingredient<S>(app: &S, name: &str, cost: f64)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, _) = send(
        app,
        test::TestRequest::post().uri("/ingredient/").set_json(json!({
            "name": name,
            "category": "fresh",
            "unit": "g",
            "cost_per_unit": cost,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

fn encode(segment: &str) -> String {
    segment.replace(' ', "%20")
}

async fn add_item<S>(app: &S, cookie: &Cookie<'static>, title: &str, ingredient: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        test::TestRequest::post()
            .uri(&format!("/shopping/{}/items/", encode(title)))
            .cookie(cookie.clone())
            .set_json(json!({"ingredient": ingredient, "quantity": 1})),
    )
    .await
}

async fn total<S>(app: &S, cookie: &Cookie<'static>, title: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        test::TestRequest::get()
            .uri(&format!("/shopping/{}/", encode(title)))
            .cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[actix_web::test]
async fn ingredient_lifecycle_round_trips_full_records() {
    let app = app().await;

    let (status, created) = send(
        &app,
        test::TestRequest::post().uri("/ingredient/").set_json(json!({
            "category": "fresh",
            "name": "My New Ingredient",
            "unit": "g",
            "cost_per_unit": 59.99,
            "available": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({
            "category": "fresh",
            "name": "My New Ingredient",
            "unit": "g",
            "cost_per_unit": 59.99,
            "available": true,
        })
    );

    let (status, priced) = send(
        &app,
        test::TestRequest::patch().uri("/ingredient/My%20New%20Ingredient/new_cost_per_unit/?price=60"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(priced["cost_per_unit"], 60.0);
    assert_eq!(priced["available"], true);

    let (status, flagged) = send(
        &app,
        test::TestRequest::patch().uri("/ingredient/My%20New%20Ingredient/flag_unavailable/"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flagged["cost_per_unit"], 60.0);
    assert_eq!(flagged["available"], false);

    let (status, fetched) = send(
        &app,
        test::TestRequest::get().uri("/ingredient/My%20New%20Ingredient/"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, flagged);
}

#[actix_web::test]
async fn duplicate_ingredient_names_conflict() {
    let app = app().await;
    create_ingredient(&app, "Tomato", 1.0).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/ingredient/").set_json(json!({
            "name": "Tomato",
            "category": "fresh",
            "unit": "kg",
            "cost_per_unit": 2.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn totals_follow_items_and_availability() {
    let app = app().await;
    create_ingredient(&app, "My New Ingredient", 59.99).await;
    create_ingredient(&app, "My New Ingredient 2", 10.0).await;
    create_ingredient(&app, "My New Ingredient 3", 10.0).await;
    let cookie = sign_in(&app, "admin").await;

    let (status, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/shopping/")
            .cookie(cookie.clone())
            .set_json(json!({"title": "My Shopping List"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({"user": FIXTURE_USER_ID, "title": "My Shopping List", "total_cost": 0.0})
    );

    for name in ["My New Ingredient", "My New Ingredient 2"] {
        let (status, _) = add_item(&app, &cookie, "My Shopping List", name).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(
        total(&app, &cookie, "My Shopping List").await,
        json!({"user": FIXTURE_USER_ID, "title": "My Shopping List", "total_cost": 69.99})
    );

    let (status, item) = add_item(&app, &cookie, "My Shopping List", "My New Ingredient 3").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["shopping_list"], "My Shopping List");
    assert_eq!(item["ingredient"], "My New Ingredient 3");
    assert_eq!(item["quantity"], 1.0);
    assert_eq!(total(&app, &cookie, "My Shopping List").await["total_cost"], 79.99);

    let (status, _) = send(
        &app,
        test::TestRequest::patch().uri("/ingredient/My%20New%20Ingredient%203/flag_unavailable/"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(total(&app, &cookie, "My Shopping List").await["total_cost"], 69.99);

    let (status, body) = add_item(&app, &cookie, "My Shopping List", "My New Ingredient 3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Ingredient is unavailable");
}

#[actix_web::test]
async fn lists_are_private_to_their_owner() {
    let app = app().await;
    create_ingredient(&app, "Tomato", 2.0).await;
    let owner = sign_in(&app, "admin").await;
    let guest = sign_in(&app, "guest").await;

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/shopping/")
            .cookie(owner.clone())
            .set_json(json!({"title": "Party"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/shopping/Party/").cookie(guest.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, _) = add_item(&app, &guest, "Party", "Tomato").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/shopping/")
            .cookie(guest)
            .set_json(json!({"title": "Party"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[rstest]
#[case("/shopping/Party/")]
#[case("/shopping/Unknown/")]
#[actix_web::test]
async fn anonymous_reads_are_unauthorised_with_trace_id(#[case] uri: &str) {
    let app = app().await;

    let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["traceId"], header.as_str());
}

#[actix_web::test]
async fn unknown_lists_and_ingredients_are_not_found() {
    let app = app().await;
    let cookie = sign_in(&app, "admin").await;

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/shopping/Nothing/").cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/shopping/")
            .cookie(cookie.clone())
            .set_json(json!({"title": "Weekly"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = add_item(&app, &cookie, "Weekly", "Dragonfruit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/login/")
            .set_json(json!({"username": "admin", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");
}
