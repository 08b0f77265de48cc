use rocket::http::{ContentType, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;

use crate::loader::dom::SeriesList;
use crate::loader::SeriesListLoader;
use crate::models::comic::SeriesPayload;
use crate::models::error::ComicError;
use crate::services::comic_service::ComicService;
use crate::utils::response::BinaryResponse;

/// The catalog payload the series list page consumes.
#[get("/comics")]
pub async fn list_comics(comic_service: &State<ComicService>) -> Json<SeriesPayload> {
    Json(SeriesPayload {
        comics: comic_service.series_list().await,
    })
}

/// Server-rendered series page, built with the same renderer the client
/// uses.
#[get("/")]
pub async fn series_page(comic_service: &State<ComicService>) -> RawHtml<String> {
    let payload = SeriesPayload {
        comics: comic_service.series_list().await,
    };
    let mut list = SeriesList::new();
    SeriesListLoader::render_into(&payload, &mut list);
    RawHtml(page_html(&list))
}

fn page_html(list: &SeriesList) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Comic Series</title></head>\n\
         <body>\n<h1>Comic Series</h1>\n{}\n</body>\n</html>\n",
        list.to_html()
    )
}

#[get("/comics/<id>")]
pub async fn get_comic(
    comic_service: &State<ComicService>,
    id: String,
) -> Result<BinaryResponse, Status> {
    let data = comic_service.get_comic_data(&id).await.map_err(|e| {
        tracing::error!("error getting comic data for {}: {}", id, e);
        match e {
            ComicError::ComicNotFound => Status::NotFound,
            _ => Status::InternalServerError,
        }
    })?;

    let comic = comic_service.get_comic(&id).await.ok_or(Status::NotFound)?;

    Ok(BinaryResponse {
        data,
        content_type: ContentType::ZIP,
        filename: Some(comic.file_name),
    })
}

#[get("/covers/<id>")]
pub async fn get_cover(
    comic_service: &State<ComicService>,
    id: String,
) -> Result<BinaryResponse, Status> {
    let cover = comic_service.get_cover(&id).await.ok_or(Status::NotFound)?;

    Ok(BinaryResponse {
        data: cover.data,
        content_type: ContentType::JPEG,
        filename: None,
    })
}

#[options("/comics")]
pub fn comics_options() -> Status {
    Status::NoContent
}

#[options("/comics/<_id>")]
pub fn comic_options(_id: String) -> Status {
    Status::NoContent
}

#[options("/covers/<_id>")]
pub fn cover_options(_id: String) -> Status {
    Status::NoContent
}
