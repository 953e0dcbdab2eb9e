pub mod pong_model;
