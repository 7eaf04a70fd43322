use clap::{Parser, Subcommand};
use warden_core::{PasswordEncoder, verify_password};
use warden_core::password::DEFAULT_COST;

#[derive(Parser)]
#[command(name = "warden-cli")]
#[command(about = "Warden CLI - password tooling for Warden accounts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a raw password with bcrypt
    EncodePassword {
        /// Password to encode
        password: String,

        /// bcrypt work factor (4-31)
        #[arg(short, long, default_value_t = DEFAULT_COST)]
        cost: u32,
    },
    /// Check a raw password against a bcrypt hash
    VerifyPassword {
        /// Raw password
        password: String,

        /// Encoded bcrypt hash
        hash: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::EncodePassword { password, cost } => {
            match PasswordEncoder::new(cost).encode(&password) {
                Ok(hash) => println!("{}", hash),
                Err(e) => {
                    eprintln!("❌ Error encoding password: {}", e.error);
                    std::process::exit(1);
                }
            }
        }
        Commands::VerifyPassword { password, hash } => {
            match verify_password(&password, &hash) {
                Ok(true) => println!("✅ Password matches"),
                Ok(false) => {
                    println!("❌ Password does not match");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("❌ Error verifying password: {}", e.error);
                    std::process::exit(2);
                }
            }
        }
    }
}
