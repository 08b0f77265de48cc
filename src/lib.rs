//! Comic series catalog: a Rocket server exposing `GET /comics` over a
//! directory of comic archives, and the typed client ([`loader`]) that
//! fetches that payload and renders it as a list of reader links.

#[macro_use]
extern crate rocket;

pub mod config;
pub mod loader;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use rocket::fs::FileServer;
use rocket::{Build, Rocket};

use crate::config::AppConfig;
use crate::services::comic_service::ComicService;
use crate::utils::cors::Cors;

/// Assembles the catalog server. The static mount serves the reader page
/// that rendered series links navigate to.
pub fn build(config: AppConfig, comic_service: ComicService) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(comic_service)
        .mount(
            "/",
            routes![
                routes::comics::series_page,
                routes::comics::list_comics,
                routes::comics::get_comic,
                routes::comics::get_cover,
                routes::comics::comics_options,
                routes::comics::comic_options,
                routes::comics::cover_options,
            ],
        )
        .mount("/static", FileServer::from(config.static_dir))
}
