use std::{io::Error, net::TcpListener};

use actix_web::{
    dev::Server,
    middleware::{Compress, Condition},
    web::{self, Data},
    HttpResponse, HttpServer,
};
use openweather::OpenweatherApi;
use sqlite::SqliteAdapter;
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;

use crate::{
    error::json_error_handler,
    routes,
    settings::{Environment, Settings},
    ApiDoc, Database, Weather,
};

pub struct App {
    server: Server,
    port: u16,
}

impl App {
    pub async fn build(settings: &Settings) -> App {
        let listener = TcpListener::bind(settings.api.listener_address()).unwrap();
        let port = listener.local_addr().unwrap().port();

        let sqlite = SqliteAdapter::new(&settings.sqlite).await.unwrap();
        sqlite.do_migrations().await.unwrap();

        let openweather = OpenweatherApi::new(&settings.openweather).unwrap();

        let server = create_server(sqlite, openweather, listener, settings).unwrap();

        App { server, port }
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        self.server.await
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

fn create_server<T, W>(
    database: T,
    provider: W,
    listener: TcpListener,
    settings: &Settings,
) -> Result<Server, Error>
where
    T: Database + Clone + Send + 'static,
    W: Weather + Clone + Send + 'static,
{
    let environment = settings.environment;
    let not_prod = environment != Environment::Production;

    let mut server = HttpServer::new(move || {
        let app = actix_web::App::new()
            .app_data(Data::new(database.clone()))
            .app_data(Data::new(provider.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Compress::default())
            .wrap(Condition::new(not_prod, actix_cors::Cors::permissive()))
            .wrap(TracingLogger::default())
            .route(
                "/weather/current",
                web::get().to(routes::v1::weather::current_weather::<W>),
            )
            .route(
                "/weather/forecast",
                web::get().to(routes::v1::weather::forecast_weather::<W>),
            )
            .route(
                "/queries",
                web::post().to(routes::v1::query::create_query::<T, W>),
            )
            .route("/queries", web::get().to(routes::v1::query::queries::<T>))
            // Registered ahead of `/queries/{id}` so "export" is never read
            // as an id.
            .route(
                "/queries/export",
                web::get().to(routes::v1::query::export_queries::<T>),
            )
            .route(
                "/queries/{id}",
                web::get().to(routes::v1::query::query_by_id::<T>),
            )
            .route(
                "/queries/{id}",
                web::put().to(routes::v1::query::update_query::<T, W>),
            )
            .route(
                "/queries/{id}",
                web::delete().to(routes::v1::query::delete_query::<T>),
            );

        if not_prod {
            let doc = ApiDoc::openapi();
            app.route(
                "/api-doc/openapi.json",
                web::get().to(move || {
                    let doc = doc.clone();
                    async move { HttpResponse::Ok().json(doc) }
                }),
            )
        } else {
            app
        }
    })
    .listen(listener)?;

    if let Some(workers) = settings.api.num_workers {
        server = server.workers(workers as usize);
    }

    Ok(server.run())
}
