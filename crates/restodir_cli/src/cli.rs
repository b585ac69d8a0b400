use clap::{Parser, Subcommand, ValueHint};
use restodir_core::CuisineTypeId;

#[derive(Parser)]
#[command(author, version, about, arg_required_else_help = true)]
pub struct Args {
    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one restaurant with its cuisine types, photos and reviews
    #[command(arg_required_else_help = true)]
    Show {
        /// Restaurant id
        id: i64,
    },

    /// List the best rated restaurants
    Top {
        /// Number of restaurants to list
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },

    /// Search restaurants
    ///
    /// With only a name, only address parts or only cuisine types, the
    /// matching single-criterion search runs. Cuisine types combined with
    /// anything else run the combined search.
    #[command(arg_required_else_help = true)]
    Search {
        /// Substring of the restaurant name
        #[arg(long)]
        name: Option<String>,

        /// Substring of the street name
        #[arg(long)]
        street: Option<String>,

        /// Substring of the postal code
        #[arg(long)]
        postal_code: Option<String>,

        /// Substring of the city
        #[arg(long)]
        city: Option<String>,

        /// Cuisine type id, repeatable
        #[arg(long = "cuisine")]
        cuisine_type_ids: Vec<CuisineTypeId>,
    },

    /// List the restaurants liked by a user
    #[command(arg_required_else_help = true)]
    Liked {
        /// User id
        user_id: i64,
    },

    /// Show a user profile with preferences and liked restaurants
    #[command(arg_required_else_help = true)]
    Profile {
        /// User id
        user_id: i64,
    },
}
