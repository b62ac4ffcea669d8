//! MAYDAY API Layer
//!
//! Two network surfaces over one alert store:
//!
//! - **gRPC** ([`grpc`]): the `AlertService` with unary, server-streaming,
//!   client-streaming, and bidirectional calls.
//! - **HTTP** ([`routes`]): a synchronous REST gateway for browser clients,
//!   bridging the streaming calls through [`bridge::GrpcBridge`].
//!
//! The `mayday-server` binary runs both surfaces in one process.

pub mod bridge;
pub mod config;
pub mod error;
pub mod grpc;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod seed;
pub mod types;

pub use bridge::GrpcBridge;
pub use config::{AdviceConfig, GatewayConfig, RpcConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use grpc::{create_service, proto, AlertServiceImpl};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::{create_gateway_router, GatewayState};
pub use seed::seed_demo_alerts;
pub use types::{AlertDto, BatchSummaryDto, ChatMessageDto, CreateAlertDto};
