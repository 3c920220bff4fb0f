//! HTTP surface of the service.
//!
//! ```text
//! /public/info, /public/products        open
//! /private/data, /private/create        API key
//! /api/data                             API key
//! /user/{id}      GET, DELETE           open, UserController
//! /users/{id}, /search                  open
//! ```

pub mod error;
pub mod handlers;
pub mod types;
pub mod users;

use std::sync::Arc;

use crate::routing::{RouteGroup, RouteTable};
use crate::security::auth::ApiKeyAuth;
use crate::store::UserStore;

use self::handlers::*;
use self::users::{
    delete_user, delete_user_without_id, get_user_info, get_user_info_without_id,
    UserController,
};

pub use error::ApiError;
pub use users::USER_DELETED_MESSAGE;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: UserController,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserController::new(store),
        }
    }
}

/// Every route the service exposes.
pub fn route_table(auth: ApiKeyAuth) -> RouteTable<AppState> {
    RouteTable::new()
        .group(
            RouteGroup::new("/public")
                .get("/info", public_info)
                .get("/products", public_products),
        )
        .group(
            RouteGroup::new("/private")
                .middleware(auth.clone())
                .get("/data", private_data)
                .post("/create", private_create),
        )
        .group(
            RouteGroup::new("/api")
                .middleware(auth)
                .get("/data", api_data),
        )
        .get("/user/:id", get_user_info)
        .delete("/user/:id", delete_user)
        // An empty id still reaches the controller so it can answer 400.
        .get("/user/", get_user_info_without_id)
        .delete("/user/", delete_user_without_id)
        .get("/users/:id", user_id)
        .get("/search", search)
}
