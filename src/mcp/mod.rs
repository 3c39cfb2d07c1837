pub mod server;

pub use server::{JaremisMcpServer, run_server};
