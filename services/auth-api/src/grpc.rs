//! gRPC UserService implementation
//!
//! Each RPC builds a [`CallContext`] from request metadata, calls the auth
//! service and funnels the outcome through [`finish`], which records timing
//! and performs the single error-to-status mapping.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tonic::{Request, Response, Status};
use tracing::{error, info};
use warden_core::{AuthError, CallContext};
use warden_kv::{SessionStore, UserCache};
use warden_proto::user_service::user_service_server::UserService;
use warden_proto::{
    FindByEmailRequest, FindByEmailResponse, FindByIdRequest, FindByIdResponse, GetMeRequest,
    GetMeResponse, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse, RegisterRequest,
    RegisterResponse, User as ProtoUser,
};
use warden_types::{NewUser, User, UserId};

use crate::error::ApiError;
use crate::metadata::{call_context, session_token};
use crate::state::AuthServiceImpl;

/// gRPC service implementation
pub struct GrpcUserService<C: UserCache, S: SessionStore> {
    auth: Arc<AuthServiceImpl<C, S>>,
    request_timeout: Duration,
}

impl<C: UserCache, S: SessionStore> GrpcUserService<C, S> {
    pub fn new(auth: Arc<AuthServiceImpl<C, S>>, request_timeout: Duration) -> Self {
        Self {
            auth,
            request_timeout,
        }
    }

    fn context<T>(&self, request: &Request<T>) -> CallContext {
        call_context(request.metadata(), self.request_timeout)
    }
}

fn timestamp(at: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}

/// Wire form of a sanitized user; the message has no password field
fn user_to_proto(user: User) -> ProtoUser {
    ProtoUser {
        uuid: user.id.to_string(),
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        role: user.role,
        avatar: user.avatar.unwrap_or_default(),
        created_at: Some(timestamp(user.created_at)),
        updated_at: Some(timestamp(user.updated_at)),
    }
}

fn register_to_candidate(req: RegisterRequest) -> NewUser {
    NewUser {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        role: req.role,
        avatar: Some(req.avatar).filter(|a| !a.trim().is_empty()),
        password: req.password,
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, AuthError> {
    UserId::parse(raw.trim()).map_err(|_| AuthError::Validation("invalid user uuid".to_string()))
}

/// Record timing, log the outcome and map errors to a status
#[allow(clippy::result_large_err)]
fn finish<T>(
    method: &'static str,
    start: Instant,
    result: Result<T, AuthError>,
) -> Result<Response<T>, Status> {
    let elapsed = start.elapsed();
    metrics::histogram!("grpc_request_duration_seconds", "method" => method)
        .record(elapsed.as_secs_f64());
    let elapsed_ms = elapsed.as_millis() as u64;

    match result {
        Ok(response) => {
            info!(method, elapsed_ms, "request completed");
            Ok(Response::new(response))
        }
        Err(err) if err.is_internal() => {
            error!(method, elapsed_ms, code = err.error_code(), error = %err, "request failed");
            Err(ApiError::from(err).into())
        }
        Err(err) => {
            info!(method, elapsed_ms, code = err.error_code(), "request rejected");
            Err(ApiError::from(err).into())
        }
    }
}

#[tonic::async_trait]
impl<C, S> UserService for GrpcUserService<C, S>
where
    C: UserCache + 'static,
    S: SessionStore + 'static,
{
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let start = Instant::now();
        let ctx = self.context(&request);
        let candidate = register_to_candidate(request.into_inner());

        let result = self
            .auth
            .register(&ctx, candidate)
            .await
            .map(|user| RegisterResponse {
                user: Some(user_to_proto(user)),
            });

        finish("register", start, result)
    }

    async fn login(&self, request: Request<LoginRequest>) -> Result<Response<LoginResponse>, Status> {
        let start = Instant::now();
        let ctx = self.context(&request);
        let req = request.into_inner();

        let result = async {
            let user = self.auth.authenticate(&ctx, &req.email, &req.password).await?;
            let token = self
                .auth
                .create_session(&ctx, user.id, self.auth.default_session_ttl())
                .await?;
            metrics::counter!("auth_sessions_created_total").increment(1);
            Ok::<_, AuthError>(LoginResponse {
                user: Some(user_to_proto(user)),
                session_id: token.into_inner(),
            })
        }
        .await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(AuthError::InvalidCredentials | AuthError::InvalidEmail) => "rejected",
            Err(_) => "error",
        };
        metrics::counter!("auth_logins_total", "result" => outcome).increment(1);

        finish("login", start, result)
    }

    async fn find_by_email(
        &self,
        request: Request<FindByEmailRequest>,
    ) -> Result<Response<FindByEmailResponse>, Status> {
        let start = Instant::now();
        let ctx = self.context(&request);
        let req = request.into_inner();

        let result = self
            .auth
            .lookup_by_email(&ctx, &req.email)
            .await
            .map(|user| FindByEmailResponse {
                user: Some(user_to_proto(user)),
            });

        finish("find_by_email", start, result)
    }

    async fn find_by_id(
        &self,
        request: Request<FindByIdRequest>,
    ) -> Result<Response<FindByIdResponse>, Status> {
        let start = Instant::now();
        let ctx = self.context(&request);
        let req = request.into_inner();

        let result = async {
            let id = parse_user_id(&req.uuid)?;
            let user = self.auth.lookup_by_id(&ctx, id).await?;
            Ok::<_, AuthError>(FindByIdResponse {
                user: Some(user_to_proto(user)),
            })
        }
        .await;

        finish("find_by_id", start, result)
    }

    async fn get_me(&self, request: Request<GetMeRequest>) -> Result<Response<GetMeResponse>, Status> {
        let start = Instant::now();
        let ctx = self.context(&request);

        let result = async {
            let token = session_token(request.metadata())?;
            let user_id = self.auth.resolve_session(&ctx, &token).await?;
            let user = self.auth.lookup_by_id(&ctx, user_id).await?;
            Ok::<_, AuthError>(GetMeResponse {
                user: Some(user_to_proto(user)),
            })
        }
        .await;

        finish("get_me", start, result)
    }

    async fn logout(&self, request: Request<LogoutRequest>) -> Result<Response<LogoutResponse>, Status> {
        let start = Instant::now();
        let ctx = self.context(&request);

        let result = async {
            let token = session_token(request.metadata())?;
            self.auth.revoke_session(&ctx, &token).await?;
            Ok::<_, AuthError>(LogoutResponse {})
        }
        .await;

        finish("logout", start, result)
    }
}
