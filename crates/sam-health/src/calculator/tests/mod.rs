mod common;
mod composite;
