mod db_layer;

pub use db_layer::{DbLayerClient, DbLayerError, DbLayerResponse, HttpDbLayerClient};
