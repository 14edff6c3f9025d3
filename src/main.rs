use actix_web::{web, App, HttpServer};

use cursus::{config::Config, database, middleware, route};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let pool = database::initialize_db_pool(&config.database_url);

    let probe = pool.clone();
    match web::block(move || database::ready_state(&probe)).await {
        Ok(database::ReadyState::Connected) => {
            log::info!("database connected at {}", config.database_url)
        }
        Ok(state) => log::error!("database {} at {}", state, config.database_url),
        Err(e) => log::error!("database probe failed: {}", e),
    }

    log::info!("starting HTTP server on port {}", config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(middleware::cors::Cors)
            .wrap(actix_web::middleware::Logger::default())
            .configure(route::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .workers(config.workers)
    .run()
    .await
}
