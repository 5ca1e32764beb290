pub mod auto_close;
