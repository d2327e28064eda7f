use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use ntex::http::StatusCode;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::{Config, Site};
use crate::content::catalog::{find, Catalog};
use crate::content::normalize::Normalizer;
use crate::content::{ContentItem, ItemKey, Lodge};
use crate::forms::{accept, ContactForm, ReviewForm};
use crate::listing::{featured, Listing, ListingOptions};
use crate::lookup::Resolution;
use crate::query_string::QueryString;
use crate::source::{ContentSource, Envelope, RemoteSource};
use crate::view::contact_renderer::ContactRenderer;
use crate::view::destination_renderer::{DestinationListRenderer, DestinationRenderer};
use crate::view::index_renderer::IndexRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::lodge_renderer::LodgeRenderer;
use crate::view::message_renderer::{Message, MessageRenderer};
use crate::view::post_renderer::PostRenderer;
use crate::view::review_renderer::ReviewRenderer;
use crate::view::TemplateSet;

/// Read-only state shared by all workers.
pub struct AppState {
    pub site: Site,
    pub listing: ListingOptions,
    pub source: ContentSource,
    pub templates: TemplateSet,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn load(config: &Config) -> anyhow::Result<AppState> {
        let normalizer = Normalizer::new(&config.defaults.placeholder_image);
        let catalog = Catalog::load(&config.paths.catalog, &normalizer)
            .with_context(|| format!("Error loading catalog {}", config.paths.catalog.display()))?;
        let templates = TemplateSet::load(&config.paths.template_dir)?;

        let remote = match config.sources {
            Some(ref sources) => {
                info!("Remote sources: blogs={:?} lodges={:?}", sources.blogs_url, sources.lodges_url);
                Some(RemoteSource::new(sources)?)
            }
            None => None,
        };

        Ok(AppState {
            site: config.site.clone(),
            listing: config.defaults.listing_options(),
            source: ContentSource::new(Arc::new(catalog), remote, normalizer),
            templates,
            public_dir: config.paths.public_dir.clone(),
        })
    }
}

type SharedState = web::types::State<Arc<AppState>>;

const BLOG_LINK: &str = "/blog";
const BLOG_LINK_LABEL: &str = "Back to the blog";
const DESTINATIONS_LINK: &str = "/destinations";
const DESTINATIONS_LINK_LABEL: &str = "Back to destinations";

fn html(status: StatusCode, body: String) -> web::HttpResponse {
    web::HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn template_error(e: io::Error) -> web::HttpResponse {
    error!("Error rendering page: {}", e);
    web::HttpResponse::InternalServerError()
        .body(format!("Error rendering page: {}", e))
}

fn message_page(state: &AppState, status: StatusCode, message: &Message) -> web::HttpResponse {
    match MessageRenderer::new(&state.templates.message) {
        Ok(renderer) => html(status, renderer.render(&state.site.name, message)),
        Err(e) => template_error(e),
    }
}

fn rendered(result: io::Result<String>) -> web::HttpResponse {
    match result {
        Ok(body) => html(StatusCode::OK, body),
        Err(e) => template_error(e),
    }
}

// Begin: Redirect region --------
fn redirect_with_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", path.into_inner() + "/")
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::get("/blog/{slug}")]
async fn blog_post_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    redirect_with_slash(path)
}

#[web::get("/destinations/{id}")]
async fn destination_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    redirect_with_slash(path)
}

#[web::get("/lodges/{id}")]
async fn lodge_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    redirect_with_slash(path)
}
// End: Redirect region --------

#[web::get("/")]
async fn index(state: SharedState) -> web::HttpResponse {
    let blogs = state.source.blogs().await;
    let featured = featured(blogs.items(), state.listing.featured_count);
    let today = Local::now().date_naive();

    rendered(IndexRenderer::new(&state.templates.index)
        .map(|renderer| renderer.render(&state.site, state.source.catalog(), &blogs, &featured, today)))
}

#[web::get("/blog")]
async fn blog_list(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let qs = QueryString::from(req.uri().query().unwrap_or(""));
    let filter = qs.get_filter();
    let blogs = state.source.blogs().await;
    let listing = Listing::build(&blogs, &filter, qs.get_page(), &state.listing);

    rendered(ListRenderer::new(&state.templates.blog_list)
        .map(|renderer| renderer.render(&state.site.name, &listing, state.source.catalog().categories(), &filter)))
}

#[web::get("/blog/{slug}/")]
async fn blog_post(path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let key = ItemKey::parse(&path.into_inner());
    let blogs = state.source.blogs().await;
    if let Some(message) = blogs.error() {
        let failure = Message::failure("Blog post", message, BLOG_LINK, BLOG_LINK_LABEL);
        return message_page(&state, StatusCode::BAD_GATEWAY, &failure);
    }

    let Some(item) = find(blogs.items(), &key) else {
        let not_found = Message::not_found("Blog post", BLOG_LINK, BLOG_LINK_LABEL);
        return message_page(&state, StatusCode::NOT_FOUND, &not_found);
    };

    rendered(PostRenderer::new(&state.templates.blog_post)
        .and_then(|renderer| renderer.render(&state.site.name, item)))
}

#[web::get("/destinations")]
async fn destination_list(state: SharedState) -> web::HttpResponse {
    rendered(DestinationListRenderer::new(&state.templates.destinations)
        .map(|renderer| renderer.render(&state.site.name, state.source.catalog().destinations())))
}

#[web::get("/destinations/{id}/")]
async fn destination_detail(path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let key = ItemKey::parse(&path.into_inner());
    let catalog = state.source.catalog();
    let Some(destination) = catalog.destination(&key) else {
        let not_found = Message::not_found("Destination", DESTINATIONS_LINK, DESTINATIONS_LINK_LABEL);
        return message_page(&state, StatusCode::NOT_FOUND, &not_found);
    };

    let lodges = catalog.lodges_at(destination);
    rendered(DestinationRenderer::new(&state.templates.destination)
        .and_then(|renderer| renderer.render(&state.site.name, destination, &lodges)))
}

#[web::get("/lodges/{id}/")]
async fn lodge_detail(path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let key = ItemKey::parse(&path.into_inner());
    let lodge = match state.source.lodge(&key).await {
        Resolution::Found(lodge) => lodge,
        Resolution::NotFound => {
            let not_found = Message::not_found("Lodge", DESTINATIONS_LINK, DESTINATIONS_LINK_LABEL);
            return message_page(&state, StatusCode::NOT_FOUND, &not_found);
        }
        Resolution::Failed(message) => {
            let failure = Message::failure("Lodge", &message, DESTINATIONS_LINK, DESTINATIONS_LINK_LABEL);
            return message_page(&state, StatusCode::BAD_GATEWAY, &failure);
        }
    };

    let catalog = state.source.catalog();
    let destination = lodge.destination.as_ref()
        .and_then(|id| catalog.destinations().iter().find(|d| d.id == *id));
    rendered(LodgeRenderer::new(&state.templates.lodge)
        .and_then(|renderer| renderer.render(&state.site.name, &lodge, destination)))
}

fn reviews_view(state: &AppState, status: StatusCode, form: Option<&ReviewForm>, errors: &[String]) -> web::HttpResponse {
    let catalog = state.source.catalog();
    match ReviewRenderer::new(&state.templates.reviews) {
        Ok(renderer) => html(status, renderer.render(&state.site.name, catalog.reviews(), catalog.average_rating(), form, errors)),
        Err(e) => template_error(e),
    }
}

async fn reviews(state: SharedState) -> web::HttpResponse {
    reviews_view(&state, StatusCode::OK, None, &[])
}

async fn submit_review(form: web::types::Form<ReviewForm>, state: SharedState) -> web::HttpResponse {
    let form = form.into_inner();
    match accept(&form) {
        Ok(receipt) => message_page(&state, StatusCode::OK, &Message {
            title: "Thank you for your review".to_string(),
            message: format!("We read every review before publishing it. Your reference is {}.", receipt.reference),
            link: "/reviews".to_string(),
            link_label: "Back to reviews".to_string(),
        }),
        Err(errors) => reviews_view(&state, StatusCode::BAD_REQUEST, Some(&form), &errors),
    }
}

fn contact_view(state: &AppState, status: StatusCode, form: &ContactForm, errors: &[String]) -> web::HttpResponse {
    match ContactRenderer::new(&state.templates.contact) {
        Ok(renderer) => html(status, renderer.render(&state.site.name, form, errors)),
        Err(e) => template_error(e),
    }
}

async fn contact(state: SharedState) -> web::HttpResponse {
    contact_view(&state, StatusCode::OK, &ContactForm::default(), &[])
}

async fn submit_contact(form: web::types::Form<ContactForm>, state: SharedState) -> web::HttpResponse {
    let form = form.into_inner();
    match accept(&form) {
        Ok(receipt) => message_page(&state, StatusCode::OK, &Message {
            title: "Message sent".to_string(),
            message: format!("Thank you, {}. We will get back to you soon. Your reference is {}.", form.name.trim(), receipt.reference),
            link: "/".to_string(),
            link_label: "Back to the home page".to_string(),
        }),
        Err(errors) => contact_view(&state, StatusCode::BAD_REQUEST, &form, &errors),
    }
}

#[web::get("/api/blogs")]
async fn api_blogs(state: SharedState) -> web::HttpResponse {
    let blogs = state.source.blogs().await;
    match blogs.error() {
        Some(message) => web::HttpResponse::BadGateway().json(&Envelope::<Vec<ContentItem>>::failure(message)),
        None => web::HttpResponse::Ok().json(&Envelope::ok(blogs.items())),
    }
}

#[web::get("/api/lodges/{id}")]
async fn api_lodge(path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let key = ItemKey::parse(&path.into_inner());
    match state.source.lodge(&key).await {
        Resolution::Found(lodge) => web::HttpResponse::Ok().json(&Envelope::ok(lodge)),
        Resolution::NotFound => web::HttpResponse::NotFound().json(&Envelope::<Lodge>::failure("Lodge not found")),
        Resolution::Failed(message) => web::HttpResponse::BadGateway().json(&Envelope::<Lodge>::failure(&message)),
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: SharedState) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

async fn not_found(state: SharedState) -> web::HttpResponse {
    message_page(&state, StatusCode::NOT_FOUND, &Message::not_found("Page", "/", "Back to the home page"))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(public_files)
        .service(blog_list)
        .service(blog_post)
        .service(blog_post_wo_slash)
        .service(destination_list)
        .service(destination_detail)
        .service(destination_wo_slash)
        .service(lodge_detail)
        .service(lodge_wo_slash)
        .service(web::resource("/reviews")
            .route(web::get().to(reviews))
            .route(web::post().to(submit_review)))
        .service(web::resource("/contact")
            .route(web::get().to(contact))
            .route(web::post().to(submit_contact)))
        .service(api_blogs)
        .service(api_lodge);
}

pub async fn server_run(config: Config) -> anyhow::Result<()> {
    let app_state = Arc::new(AppState::load(&config)?);
    let catalog = app_state.source.catalog();
    info!("Catalog: {} posts, {} destinations, {} lodges, {} reviews",
        catalog.posts().len(), catalog.destinations().len(), catalog.lodges().len(), catalog.reviews().len());

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .configure(routes)
            .default_service(web::route().to(not_found))
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await?;

    Ok(())
}
