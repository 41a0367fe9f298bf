use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a field list and print the select expression it renders to
    Query {
        #[arg(
            long,
            help = "Comma-separated fields, e.g. federation_id,users.name,weight_classes"
        )]
        fields: Option<String>,

        #[arg(long, help = "Projection dialect: postgrest or postgrest-inner")]
        dialect: Option<String>,

        #[arg(
            long,
            help = "Print the validated projection as JSON instead of the select expression"
        )]
        ast: bool,
    },
    /// Fetch one athlete profile from the configured backend
    Fetch {
        #[arg(long, help = "Athlete id")]
        id: String,

        #[arg(long, help = "Comma-separated fields; omit for the default projection")]
        fields: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the JSON record to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Complete a user's profile from a JSON file
    CreateProfile {
        #[arg(long, help = "User id")]
        user: String,

        #[arg(long, help = "Path to the JSON profile")]
        profile: String,
    },
    /// Change a user's name or username from a JSON file
    UpdateProfile {
        #[arg(long, help = "User id")]
        user: String,

        #[arg(long, help = "Path to the JSON changes")]
        changes: String,
    },
    /// Print the active field catalog as JSON
    Catalog {
        #[arg(
            long,
            help = "If specified, writes the catalog to this file instead of stdout"
        )]
        output: Option<String>,
    },
}
