pub mod comic_service;
