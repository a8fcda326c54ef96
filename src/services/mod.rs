pub mod completion_service;
pub mod question_service;
pub mod response_parser;
pub mod search_service;
pub mod tutor_service;
