pub mod preview_server;
