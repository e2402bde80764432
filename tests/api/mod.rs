//! REST API endpoint tests

mod category_tests;
mod health_tests;
mod product_tests;
