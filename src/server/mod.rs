pub mod app;
mod deserializers;
mod error;
mod pagination;
mod quiz;
mod routes;
