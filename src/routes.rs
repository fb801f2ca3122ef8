use log::error;
use rand::seq::SliceRandom;
use rocket::form::Form;
use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::{delete, get, patch, post, FromForm, State};

use crate::auth::Authorizer;
use crate::models::{yes_to_bool, Cafe, NewCafe};
use crate::repository::{CafeStore, StoreError};

/// Serializes records as an id-keyed object, the shape used by `/all` and
/// `/search`.
fn record_map(cafes: Vec<Cafe>) -> Value {
    Value::Object(
        cafes
            .into_iter()
            .map(|cafe| (cafe.id.to_string(), json!(cafe)))
            .collect(),
    )
}

fn not_found(message: &str) -> (Status, Json<Value>) {
    (
        Status::NotFound,
        Json(json!({ "error": { "Not found": message } })),
    )
}

fn storage_failure(err: StoreError) -> (Status, Json<Value>) {
    error!("storage failure: {}", err);
    (
        Status::InternalServerError,
        Json(json!({
            "error": { "Internal Server Error": "The storage backend failed to complete the request." }
        })),
    )
}

#[get("/all")]
pub async fn all_cafes(store: &State<Box<dyn CafeStore>>) -> (Status, Json<Value>) {
    match store.list_all().await {
        Ok(cafes) => (Status::Ok, Json(json!({ "all_cafes": record_map(cafes) }))),
        Err(err) => storage_failure(err),
    }
}

#[get("/random_one")]
pub async fn random_one(store: &State<Box<dyn CafeStore>>) -> (Status, Json<Value>) {
    match store.list_all().await {
        Ok(cafes) => match cafes.choose(&mut rand::thread_rng()) {
            Some(cafe) => (Status::Ok, Json(json!({ "cafe": cafe }))),
            None => not_found("No cafes available."),
        },
        Err(err) => storage_failure(err),
    }
}

#[get("/search?<loc>")]
pub async fn search(
    loc: Option<String>,
    store: &State<Box<dyn CafeStore>>,
) -> (Status, Json<Value>) {
    // A missing `loc` matches nothing, same as a location no cafe is at.
    let found = match loc {
        Some(ref location) => match store.filter_by_location(location).await {
            Ok(cafes) => cafes,
            Err(err) => return storage_failure(err),
        },
        None => Vec::new(),
    };

    if found.is_empty() {
        not_found("No cafe at that location.")
    } else {
        (
            Status::Ok,
            Json(json!({ "cafes_found": record_map(found) })),
        )
    }
}

#[derive(FromForm)]
pub struct AddCafeForm {
    name: Option<String>,
    map_url: Option<String>,
    img_url: Option<String>,
    location: Option<String>,
    seats: Option<String>,
    has_toilet: Option<String>,
    has_wifi: Option<String>,
    has_sockets: Option<String>,
    can_take_calls: Option<String>,
    coffee_price: Option<String>,
}

impl AddCafeForm {
    /// Validates the required keys and coerces the amenity flags. Missing or
    /// empty required fields are collected so the error can name all of them
    /// at once.
    fn into_new_cafe(self) -> Result<NewCafe, Vec<&'static str>> {
        fn take(
            value: Option<String>,
            key: &'static str,
            missing: &mut Vec<&'static str>,
        ) -> String {
            match value {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(key);
                    String::new()
                }
            }
        }

        let mut missing = Vec::new();
        let name = take(self.name, "name", &mut missing);
        let map_url = take(self.map_url, "map_url", &mut missing);
        let img_url = take(self.img_url, "img_url", &mut missing);
        let location = take(self.location, "location", &mut missing);
        let seats = take(self.seats, "seats", &mut missing);
        let has_toilet = take(self.has_toilet, "has_toilet", &mut missing);
        let has_wifi = take(self.has_wifi, "has_wifi", &mut missing);
        let has_sockets = take(self.has_sockets, "has_sockets", &mut missing);
        let can_take_calls = take(self.can_take_calls, "can_take_calls", &mut missing);

        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(NewCafe {
            name,
            map_url,
            img_url,
            location,
            seats,
            has_toilet: yes_to_bool(&has_toilet),
            has_wifi: yes_to_bool(&has_wifi),
            has_sockets: yes_to_bool(&has_sockets),
            can_take_calls: yes_to_bool(&can_take_calls),
            coffee_price: self.coffee_price,
        })
    }
}

#[post("/add", data = "<form>")]
pub async fn add_cafe(
    form: Form<AddCafeForm>,
    store: &State<Box<dyn CafeStore>>,
) -> (Status, Json<Value>) {
    let new_cafe = match form.into_inner().into_new_cafe() {
        Ok(new_cafe) => new_cafe,
        Err(missing) => {
            return (
                Status::BadRequest,
                Json(json!({
                    "error": {
                        "Bad Request": format!("Missing required field(s): {}", missing.join(", "))
                    }
                })),
            )
        }
    };

    match store.insert(new_cafe).await {
        Ok(_) => (
            Status::Ok,
            Json(json!({ "response": { "success": "New cafe added successfully." } })),
        ),
        Err(StoreError::DuplicateName(name)) => (
            Status::Conflict,
            Json(json!({
                "error": { "Conflict": format!("A cafe named '{}' already exists.", name) }
            })),
        ),
        Err(err) => storage_failure(err),
    }
}

#[patch("/update-price/<cafe_id>?<new_price>")]
pub async fn update_price(
    cafe_id: i64,
    new_price: String,
    store: &State<Box<dyn CafeStore>>,
) -> (Status, Json<Value>) {
    match store.update_price(cafe_id, &new_price).await {
        Ok(Some(_)) => (
            Status::Ok,
            Json(json!({ "response": { "success": "Coffee price successfully updated." } })),
        ),
        Ok(None) => not_found("No cafe with that ID found."),
        Err(err) => storage_failure(err),
    }
}

#[derive(FromForm)]
pub struct DeleteParams {
    #[field(name = "api-key")]
    api_key: Option<String>,
}

#[delete("/report-closed/<cafe_id>?<params..>")]
pub async fn report_closed(
    cafe_id: i64,
    params: DeleteParams,
    store: &State<Box<dyn CafeStore>>,
    authorizer: &State<Box<dyn Authorizer>>,
) -> (Status, Json<Value>) {
    // The key check comes first so the response never reveals whether the
    // target id exists.
    if !authorizer.is_authorized(params.api_key.as_deref()) {
        return (
            Status::Forbidden,
            Json(json!({
                "error": { "Forbidden": "You are not authorized to delete cafes." }
            })),
        );
    }

    match store.delete(cafe_id).await {
        Ok(true) => (
            Status::Ok,
            Json(json!({ "response": { "success": "Cafe successfully deleted from database." } })),
        ),
        Ok(false) => not_found("No cafe with that ID found."),
        Err(err) => storage_failure(err),
    }
}
