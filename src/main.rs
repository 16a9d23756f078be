use std::env;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use backoffice::auth::AuthConfig;
use backoffice::db::establish_connection_pool;
use backoffice::repository::DieselRepository;
use backoffice::routes::enquiries::{
    add_answer, delete_answer, delete_enquiry, edit_answer, show_answer, show_enquiries,
};
use backoffice::routes::events::{show_event_products, show_events};
use backoffice::routes::products::{
    add_product, show_product_detail, show_products, show_registration_refs,
};
use backoffice::storage::LocalObjectStorage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = match env::var("JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            log::error!("JWT_SECRET environment variable not set");
            std::process::exit(1);
        }
    };
    let auth_config = AuthConfig { secret };

    let media_root = env::var("MEDIA_ROOT").unwrap_or("./media".to_string());
    let media_base_url = env::var("MEDIA_BASE_URL").unwrap_or("/media".to_string());
    let storage = LocalObjectStorage::new(&media_root, &media_base_url);

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/media", media_root.clone()))
            // `/products/new` must be registered before `/products/{product_code}`.
            .service(show_registration_refs)
            .service(show_products)
            .service(add_product)
            .service(show_product_detail)
            .service(show_events)
            .service(show_event_products)
            .service(show_enquiries)
            .service(show_answer)
            .service(add_answer)
            .service(edit_answer)
            .service(delete_answer)
            .service(delete_enquiry)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(auth_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
