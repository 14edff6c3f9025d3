use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use cursus::client::{
    FieldUpdate, HttpTransport, SignupController, TerminalNotifier, TextField, ToggleField,
};
use cursus::form::user::Role;

#[derive(Copy, Clone, ValueEnum)]
enum RoleArg {
    Student,
    Instructor,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => Role::Student,
            RoleArg::Instructor => Role::Instructor,
        }
    }
}

#[derive(Parser)]
#[command(name = "cursus-signup", version, about = "Create a Cursus account")]
struct Cli {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Learn or teach
    #[arg(long, value_enum, default_value = "student")]
    role: RoleArg,
    /// Agree to receive emails with discounts and recommendations
    #[arg(long)]
    email_opt_in: bool,
    /// Base URL of the Cursus backend
    #[arg(long, env = "CURSUS_API_URL", default_value = "http://127.0.0.1:5000")]
    server: String,
}

#[actix_web::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let cli = Cli::parse();

    let transport = match HttpTransport::new(&cli.server) {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let username = cli.username.clone();
    let controller = SignupController::new(transport, TerminalNotifier)
        .on_sign_up(move || println!("Signed up as {}", username));

    controller.update_field(FieldUpdate::text(TextField::Username, cli.username));
    controller.update_field(FieldUpdate::text(TextField::Email, cli.email));
    controller.update_field(FieldUpdate::text(TextField::Password, cli.password));
    controller.update_field(FieldUpdate::text(
        TextField::Role,
        Role::from(cli.role).as_str(),
    ));
    controller.update_field(FieldUpdate::toggle(ToggleField::EmailOptIn, cli.email_opt_in));

    match controller.submit().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
