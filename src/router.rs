use axum::{routing::get, Router};

use crate::{
    controller::{
        auth::{callback, home, login},
        user::list_users,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/users", get(list_users))
}
