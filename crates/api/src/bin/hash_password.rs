//! Print an Argon2id hash for `ADMIN_PASSWORD_HASH`.
//!
//! Usage: `hash-password <password>`, or pipe the password on stdin.

use std::io::BufRead;

use outreach_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};

fn main() {
    let password = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .expect("Failed to read password from stdin");
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
        eprintln!("{msg}");
        std::process::exit(1);
    }

    match hash_password(&password) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("Failed to hash password: {e}");
            std::process::exit(1);
        }
    }
}
