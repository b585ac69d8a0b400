//! `restodir` command line entry point.
//!
//! # Responsibility
//! - Open the configured directory database and run one read query.
//! - Print results as JSON on stdout; errors go to stderr.

mod cli;

use clap::Parser;
use cli::{Args, Commands};
use log::{error, info};
use restodir_core::db::{open_db, DbError};
use restodir_core::{
    init_logging, AddressCriteria, ConfigError, CuisineTypeId, DirectoryConfig, MultiCriteria,
    ProfileService, ProfileServiceError, RepoError, RestaurantRepository, SearchRequest,
    SearchService, SqliteRestaurantRepository, SqliteUserRepository,
};
use serde::Serialize;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Profile(#[from] ProfileServiceError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error("invalid search: {0}")]
    InvalidSearch(&'static str),
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = match args.config.as_deref() {
        Some(path) => DirectoryConfig::load(path)?,
        None => DirectoryConfig::default(),
    };
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir).map_err(CliError::Logging)?;
    }

    let conn = open_db(&config.database_path)?;
    let restaurants = SqliteRestaurantRepository::try_new(&conn)?;
    let pretty = args.pretty;

    match args.command {
        Commands::Show { id } => {
            let restaurant = restaurants
                .get_by_id(id)?
                .ok_or(CliError::NotFound {
                    kind: "restaurant",
                    id,
                })?;
            print_json(&restaurant, pretty)
        }
        Commands::Top { count } => {
            let service = SearchService::new(restaurants);
            print_json(&service.top_rated(count)?, pretty)
        }
        Commands::Search {
            name,
            street,
            postal_code,
            city,
            cuisine_type_ids,
        } => {
            let request =
                build_search_request(name, street, postal_code, city, cuisine_type_ids)?;
            info!(
                "event=cli_search module=cli status=start criterion={}",
                request.criterion()
            );
            let service = SearchService::new(restaurants);
            print_json(&service.search(&request)?, pretty)
        }
        Commands::Liked { user_id } => {
            print_json(&restaurants.get_liked_by_user(user_id)?, pretty)
        }
        Commands::Profile { user_id } => {
            let service = ProfileService::new(SqliteUserRepository::try_new(&conn)?, restaurants);
            let view = service.profile(user_id)?.ok_or(CliError::NotFound {
                kind: "user",
                id: user_id,
            })?;
            print_json(&view, pretty)
        }
    }
}

/// Maps search flags onto one search request.
///
/// Name and address parts without any cuisine type are rejected when given
/// together: the combined search only returns restaurants proposing one of
/// the selected cuisine types.
fn build_search_request(
    name: Option<String>,
    street: Option<String>,
    postal_code: Option<String>,
    city: Option<String>,
    cuisine_type_ids: Vec<CuisineTypeId>,
) -> Result<SearchRequest, CliError> {
    let has_address = street.is_some() || postal_code.is_some() || city.is_some();
    let address = AddressCriteria::new(
        street.unwrap_or_default(),
        postal_code.unwrap_or_default(),
        city.unwrap_or_default(),
    );

    let request = match (name, has_address, cuisine_type_ids.is_empty()) {
        (None, false, true) => {
            return Err(CliError::InvalidSearch("at least one criterion is required"))
        }
        (Some(_), true, true) => {
            return Err(CliError::InvalidSearch(
                "combining name and address requires at least one --cuisine",
            ))
        }
        (Some(text), false, true) => SearchRequest::ByName { text },
        (None, true, true) => SearchRequest::ByAddress(address),
        (None, false, false) => SearchRequest::ByCuisineTypes {
            ids: cuisine_type_ids,
        },
        (name, _, false) => SearchRequest::Multi(MultiCriteria {
            name: name.unwrap_or_default(),
            address,
            cuisine_type_ids,
        }),
    };
    Ok(request)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
