//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between
//! the controller/bot layer and the data (store) layer. Services are responsible
//! for:
//!
//! - **OAuth exchange** (`oauth`) - Turning authorization codes into verified
//!   credential records via the Discord token and identity endpoints
//! - **Guild membership** (`member`) - The join-guild call against the Discord
//!   REST API on behalf of a stored user
//! - **Bulk join orchestration** (`bulk`) - Fanning the membership call out over
//!   every stored credential with per-user failure accounting

pub mod bulk;
pub mod member;
pub mod oauth;
