//! Student Registry Server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{App, HttpRequest, HttpServer, Result as ActixResult, http::header, web};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use student_registry_lib::auth::AdminKey;
use student_registry_lib::config::{ADMIN_KEY_HEADER, Config};
use student_registry_lib::services::Sessions;
use student_registry_lib::{api, middleware};

/// SPA fallback handler - serves index.html for client-side routing.
async fn spa_fallback(req: HttpRequest) -> ActixResult<NamedFile> {
    let static_dir = req
        .app_data::<web::Data<PathBuf>>()
        .ok_or_else(|| actix_web::error::ErrorNotFound("Static dir not configured"))?;
    Ok(NamedFile::open(static_dir.join("index.html"))?)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        if Config::from_env().is_ok() {
            std::process::exit(0);
        } else {
            std::process::exit(1);
        }
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, SRS_ADMIN_KEY and SRS_PUBLIC_URL must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Student Registry Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development default for SRS_ADMIN_KEY");
    }

    let sessions = match Sessions::from_config(&config) {
        Ok(sessions) => sessions,
        Err(e) => {
            error!("Failed to initialize registry: {}", e);
            std::process::exit(1);
        }
    };
    {
        let registry = sessions.store().read().await;
        info!(
            "Registry ready: {} schools, {} students (serial policy: {})",
            registry.schools().len(),
            registry.total_students(),
            registry.serial_policy()
        );
    }
    info!(
        "Simulated latency: {}ms add school, {}ms submit student, timeout {}s",
        config.timing.school_latency.as_millis(),
        config.timing.student_latency.as_millis(),
        config.timing.timeout.as_secs()
    );
    info!("Registration links are built on {}", config.public_url);

    let bind_address = config.bind_address();
    let admin_key = AdminKey::new(config.admin_key.clone());
    let static_dir = config.static_dir.clone();
    let is_development = config.is_development();

    if !admin_key.is_configured() {
        warn!("No SRS_ADMIN_KEY set - dashboard routes are disabled");
    }

    if static_dir.is_some() {
        info!("Static file serving enabled from {:?}", static_dir);
    }

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        let cors = if is_development {
            // Permissive CORS for development
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .allowed_header(ADMIN_KEY_HEADER)
                .expose_headers(vec![header::CONTENT_DISPOSITION])
                .max_age(3600)
        } else {
            // Restrictive CORS for production (same-origin only)
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .allowed_header(ADMIN_KEY_HEADER)
                .max_age(3600)
        };

        let mut app = App::new()
            // CORS must be before other middleware
            .wrap(cors)
            .wrap(middleware::RequestLogger)
            // Shared state
            .app_data(web::Data::new(sessions.clone()))
            .app_data(web::Data::new(admin_key.clone()))
            .service(web::scope("/api/v1").configure(api::configure_routes));

        // Serve the front end when SRS_STATIC_DIR is set
        if let Some(ref dir) = static_dir {
            app = app
                .app_data(web::Data::new(dir.clone()))
                .service(Files::new("/assets", dir.join("assets")).prefer_utf8(true))
                // SPA fallback - serve index.html for all other routes
                .default_service(web::route().to(spa_fallback));
        }

        app
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
