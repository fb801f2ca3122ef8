#[macro_use]
extern crate rocket;

mod auth;
mod config;
mod models;
mod repository;
mod routes;


use dotenv::dotenv;
use log::info;
use mongodb::Client;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::{json, Json, Value};
use rocket::{Build, Request, Response, Rocket};

use auth::{Authorizer, StaticApiKey};
use config::AppConfig;
use repository::cafe_repository::MongoCafeRepository;
use repository::CafeStore;

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, DELETE, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));
    }
}

#[options("/<_path..>")]
fn all_options(_path: std::path::PathBuf) -> Status {
    Status::Ok
}

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    Json(json!({
        "error": { "Not found": format!("'{}' is not a recognised route", req.uri()) }
    }))
}

#[catch(422)]
fn unprocessable(_req: &Request) -> Json<Value> {
    Json(json!({
        "error": { "Bad Request": "The request parameters could not be parsed." }
    }))
}

/// Assembles the rocket with its injected store and authorizer. Tests build
/// the same instance over the in-memory store.
pub fn build_rocket(store: Box<dyn CafeStore>, authorizer: Box<dyn Authorizer>) -> Rocket<Build> {
    rocket::build()
        .manage(store)
        .manage(authorizer)
        .attach(CORS)
        .mount(
            "/",
            routes![
                routes::all_cafes,
                routes::random_one,
                routes::search,
                routes::add_cafe,
                routes::update_price,
                routes::report_closed,
                all_options,
            ],
        )
        .register("/", catchers![not_found, unprocessable])
}

#[launch]
async fn rocket() -> _ {
    dotenv().ok();
    let config = AppConfig::from_env();

    let client = Client::with_uri_str(&config.mongo_uri)
        .await
        .expect("failed to connect to MongoDB");
    info!("using database '{}' at {}", config.database, config.mongo_uri);

    let store: Box<dyn CafeStore> = Box::new(MongoCafeRepository::new(&client, &config.database));
    let authorizer: Box<dyn Authorizer> = Box::new(StaticApiKey::new(config.api_key));

    build_rocket(store, authorizer)
}
