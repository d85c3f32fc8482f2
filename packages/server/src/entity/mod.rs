pub mod viewer_instance;
