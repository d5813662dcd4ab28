//! Unit tests for LoggingHandler.

use dbot_core::{Handler, HandlerResponse};

use super::mock_bot::{photo_message, text_message};
use crate::LoggingHandler;

#[tokio::test]
async fn test_logging_handler_before_continues() {
    let h = LoggingHandler;
    assert!(h.before(&text_message("hello")).await.unwrap());
    assert!(h.before(&photo_message("f1")).await.unwrap());
}

#[tokio::test]
async fn test_logging_handler_after_ok() {
    let h = LoggingHandler;
    let response = HandlerResponse::Reply("hi".to_string());
    assert!(h.after(&text_message("hello"), &response).await.is_ok());
}
