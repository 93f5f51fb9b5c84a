use actix_web::{web, App, HttpServer};
use joli_backend::config::db::DbProfile;
use joli_backend::config::join_codes::JoinCodeSettings;
use joli_backend::config::server::ServerSettings;
use joli_backend::infra::state::build_state;
use joli_backend::middleware::rate_limit::JoinRateLimit;
use joli_backend::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use joli_backend::routes;
use joli_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment comes from the runtime (docker env_file, or a sourced .env locally).
    let settings = match ServerSettings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };
    let join_codes = match JoinCodeSettings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "invalid join code configuration");
            std::process::exit(1);
        }
    };

    let mut security = SecurityConfig::new(settings.jwt_secret.as_bytes());
    if let Some(aud) = &settings.jwt_audience {
        security = security.with_audience(aud.as_str());
    }

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_security(security)
        .with_join_codes(join_codes)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %settings.host,
        port = settings.port,
        code_length = join_codes.length,
        join_rate_limit_per_minute = settings.join_rate_limit_per_minute,
        "starting Joli backend"
    );

    let data = web::Data::new(app_state);
    let join_limit = JoinRateLimit::new(settings.join_rate_limit_per_minute);

    HttpServer::new(move || {
        let join_limit = join_limit.clone();
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            // Outermost: RequestTrace has already turned errors into responses.
            .wrap(SecurityHeaders)
            .app_data(data.clone())
            .configure(move |cfg| routes::configure(cfg, &join_limit))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
