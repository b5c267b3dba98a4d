// Command-line smoke client for the SplitParty services
use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::info;

use splitparty::client::config::ClientConfig;
use splitparty::client::models::app_state::{Router, Screen};
use splitparty::client::services::auth_service::{AuthClient, LoginRequest, RegisterRequest};
use splitparty::client::services::{bill_service, party_service};
use splitparty::client::services::party_service::PartyService;
use splitparty::client::storage::FileStore;
use splitparty::client::utils::session_store;
use splitparty::common::models::{Participant, ProductForm};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::from_env();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();

    let mut store = FileStore::open(&config.store_path)?;
    let auth = AuthClient::new(config.api_base_url.clone());
    let mut parties = PartyService::new();
    let mut router = Router::new();
    let mut nickname: Option<String> = None;

    // Try to restore the previous session before showing the welcome screen.
    if let Some(token) = session_store::load_access_token() {
        match auth.current_user(&token).await {
            Ok(profile) => {
                info!("session restored for {}", profile.nickname);
                nickname = Some(profile.nickname);
            }
            Err(e) => info!("stored session rejected: {}", e),
        }
    }
    router.reset(Screen::on_startup(nickname.is_some()));

    println!("splitparty client — API at {}", config.api_base_url);
    println!("commands: register | verify | login | logout | whoami | demo | quit");

    let stdin = io::stdin();
    loop {
        print!("[{:?}] >> ", router.current());
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["quit"] | ["exit"] => break,
            ["register", email, nick, password] => {
                let result = auth
                    .register(&RegisterRequest {
                        email: email.to_string(),
                        nickname: nick.to_string(),
                        password: password.to_string(),
                    })
                    .await;
                match &result {
                    Ok(()) => println!("registered, check your email for the code"),
                    Err(e) => println!("registration failed: {}", e),
                }
                router.reset(Screen::after_register(&result));
            }
            ["verify", code] => {
                let result = auth.verify_email(code).await;
                match &result {
                    Ok(()) => println!("email verified, you can log in now"),
                    Err(e) => println!("verification failed: {}", e),
                }
                router.reset(Screen::after_verify(&result, true));
            }
            ["login", email_or_nick, password] => {
                let result = auth
                    .login(&LoginRequest {
                        email_or_nick: email_or_nick.to_string(),
                        password: password.to_string(),
                    })
                    .await;
                match &result {
                    Ok(token) => match auth.current_user(&token.access_token).await {
                        Ok(profile) => {
                            println!("logged in as {}", profile.nickname);
                            nickname = Some(profile.nickname);
                        }
                        Err(e) => println!("logged in but /me failed: {}", e),
                    },
                    Err(e) => println!("login failed: {}", e),
                }
                router.reset(Screen::after_login(&result));
            }
            ["logout"] => {
                let _ = session_store::clear_access_token();
                nickname = None;
                router.reset(Screen::after_logout());
                println!("logged out");
            }
            ["whoami"] => match &nickname {
                Some(nick) => println!("{}", nick),
                None => println!("not logged in"),
            },
            ["demo"] => {
                let user = nickname.clone().unwrap_or_else(|| "@local".to_string());
                run_demo(&mut store, &mut parties, &user);
            }
            [] => {}
            _ => println!("unknown command"),
        }
    }
    Ok(())
}

/// Offline walkthrough: create a party, a bill and a product, claim two
/// units, save, then reload from the store and print the owed total.
fn run_demo(store: &mut FileStore, parties: &mut PartyService, user: &str) {
    let creator = Participant::new(user);
    let party_id = parties.add_party("Afterwork downtown", "18.09-27.10", creator.clone());

    // invite one friend; the creator keeps the admin flag
    let all_users = vec![creator, Participant::new("@honer")];
    let selection: HashSet<_> = all_users.iter().map(|u| u.id).collect();
    if let Some(party) = parties.parties.iter_mut().find(|p| p.id == party_id) {
        party_service::replace_participants(party, &all_users, &selection);
    }

    let bill = bill_service::new_bill(user);
    bill_service::save_bill_list(store, party_id, &[bill.clone()]);

    let mut sheet = bill_service::load_sheet(store, bill, Vec::new());
    if sheet
        .add_product(&ProductForm {
            name: "Chips".to_string(),
            price_per_unit: "50".to_string(),
            total_quantity: "3".to_string(),
        })
        .is_ok()
    {
        let product_id = sheet.products[0].id;
        sheet.increment(product_id);
        sheet.increment(product_id);
    }
    bill_service::save_sheet(store, &mut sheet, user);

    let reloaded = bill_service::load_sheet(store, sheet.bill.clone(), Vec::new());
    let bills = bill_service::load_bill_list(store, party_id, Vec::new());
    println!(
        "party '{}' with {} participant(s), {} bill(s)",
        parties.get(party_id).map(|p| p.title.as_str()).unwrap_or("?"),
        parties.get(party_id).map(|p| p.participants.len()).unwrap_or(0),
        bills.len()
    );
    println!("you owe {} for '{}'", reloaded.total(), reloaded.bill.title);
}
