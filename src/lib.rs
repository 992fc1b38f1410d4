//! Reelax: bedtime-aware movie recommendations.
//!
//! The server side is a single proxy endpoint ([`api`]) that turns a genre and
//! a runtime ceiling into a filtered list of TMDB titles ([`services`]). The
//! client side is a step-by-step [`wizard`] that calls that endpoint.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod wizard;
