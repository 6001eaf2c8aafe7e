//! Warden Proto - gRPC Protocol Buffers
//!
//! Generated code from Protocol Buffer definitions for the Warden gRPC
//! surface.
//!
//! # Example
//!
//! ```ignore
//! use warden_proto::user_service::user_service_client::UserServiceClient;
//! use warden_proto::LoginRequest;
//!
//! let mut client = UserServiceClient::connect("http://localhost:5000").await?;
//! let response = client
//!     .login(LoginRequest {
//!         email: "user@example.com".to_string(),
//!         password: "secret123".to_string(),
//!     })
//!     .await?;
//! let token = response.into_inner().session_id;
//! ```

// Suppress clippy warnings from generated tonic code
#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::too_many_lines)]

/// Warden v1 API types and services.
pub mod warden {
    pub mod v1 {
        tonic::include_proto!("warden.v1");

        /// File descriptor set for gRPC reflection.
        pub const FILE_DESCRIPTOR_SET: &[u8] =
            tonic::include_file_descriptor_set!("warden_descriptor");
    }
}

// Re-export commonly used types at crate root for convenience
pub use warden::v1::*;

pub mod user_service {
    pub use super::warden::v1::user_service_client;
    pub use super::warden::v1::user_service_server;
}

/// Metadata key carrying the opaque session token
pub const SESSION_METADATA_KEY: &str = "session_id";
