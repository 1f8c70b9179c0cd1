//! Middleware pipeline: stage ordering and wiring.
//!
//! A request passes the stages in this order:
//!
//! 1. cross-origin policy ([`super::cors`]);
//! 2. body parsing ([`super::body`], applied when a handler extracts a body);
//! 3. resource routers, matched by path prefix in registration order;
//! 4. the catch-all, answering 404 for anything unclaimed;
//! 5. the fault boundary ([`FaultBoundary`]), which settles every raised
//!    error into an envelope.
//!
//! Routers and the catch-all are registered with actix in exactly the order
//! they were added to the [`Pipeline`]. A router added after the catch-all is
//! unreachable.

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use super::body::{form_config, json_config};
use super::cors::cors_policy;
use super::error::route_not_found;
use super::faqs;
use super::faults::FaultBoundary;
use super::state::HttpState;

/// Versioned prefix under which resource routers are mounted.
pub const API_PREFIX: &str = "/api/v1";

/// A resource router mounted under a path prefix.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, web};
/// use faq_backend::inbound::http::Mount;
///
/// fn configure(cfg: &mut web::ServiceConfig) {
///     cfg.route("", web::get().to(|| async { HttpResponse::Ok().finish() }));
/// }
///
/// let mount = Mount::new("/api/v1/ping", configure);
/// assert_eq!(mount.prefix(), "/api/v1/ping");
/// ```
#[derive(Clone)]
pub struct Mount {
    prefix: String,
    configure: fn(&mut web::ServiceConfig),
}

impl Mount {
    /// Mount `configure`'s services under `prefix`.
    pub fn new(prefix: impl Into<String>, configure: fn(&mut web::ServiceConfig)) -> Self {
        Self {
            prefix: prefix.into(),
            configure,
        }
    }

    /// Path prefix owned by the router.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[derive(Clone)]
enum Stage {
    Router(Mount),
    CatchAll,
}

/// Ordered description of the request pipeline.
///
/// Cheap to clone; actix builds one app per worker from it.
#[derive(Clone)]
pub struct Pipeline {
    allowed_origin: Option<String>,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Start an empty pipeline with the given cross-origin value.
    pub fn new(allowed_origin: Option<String>) -> Self {
        Self {
            allowed_origin,
            stages: Vec::new(),
        }
    }

    /// The service's pipeline: the FAQ router followed by the catch-all.
    pub fn standard(allowed_origin: Option<String>) -> Self {
        Self::new(allowed_origin).mount(faqs::mount()).catch_all()
    }

    /// Append a resource router.
    #[must_use]
    pub fn mount(mut self, mount: Mount) -> Self {
        self.stages.push(Stage::Router(mount));
        self
    }

    /// Append the catch-all stage.
    #[must_use]
    pub fn catch_all(mut self) -> Self {
        self.stages.push(Stage::CatchAll);
        self
    }

    /// Build the actix application for one worker.
    pub fn build(
        &self,
        state: web::Data<HttpState>,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = Error,
            InitError = (),
        > + use<>,
    > {
        let mut app = App::new()
            .app_data(state)
            .app_data(json_config())
            .app_data(form_config());

        for stage in &self.stages {
            app = match stage {
                Stage::Router(mount) => {
                    app.service(web::scope(&mount.prefix).configure(mount.configure))
                }
                Stage::CatchAll => app.service(web::resource("/{tail:.*}").to(route_not_found)),
            };
        }

        // Unmatched paths inside a mounted scope fall back to the app default.
        app.default_service(web::to(route_not_found))
            .wrap(cors_policy(self.allowed_origin.as_deref()))
            .wrap(FaultBoundary)
    }
}
