// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use storefront_rs::codec::WriteMode;
use storefront_rs::validate::{
    is_non_empty, is_valid_name, parse_positive_int, parse_price, parse_yes_no,
};
use storefront_rs::{
    Inventory, ProductUpdate, Role, SalesLog, StoreError, User, UserRegistry, UserUpdate,
};
use tracing_subscriber::EnvFilter;

const LOGIN_MAX_TRIES: u32 = 3;

/// Storefront console - manage inventory, users, and sales
///
/// Loads the three CSV files from the data directory on startup, asks
/// for credentials, and opens the menu matching the user's role.
#[derive(Parser, Debug)]
#[command(name = "storefront-rs")]
#[command(about = "A role-gated console storefront backed by CSV files", long_about = None)]
struct Args {
    /// Directory holding Inventory.csv, Users.csv, and Sales.csv
    #[arg(value_name = "DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut inventory = Inventory::new();
    let mut users = UserRegistry::with_defaults();
    let mut sales = SalesLog::new();

    // A missing file is "starting fresh"; only filesystem-level failures
    // surface here, and even those don't stop the session.
    report_load("inventory", inventory.load_csv(&args.data_dir));
    report_load("users", users.load_csv(&args.data_dir));
    report_load("sales", sales.load_csv(&args.data_dir));

    let Some(current) = login(&users) else {
        println!("Too many attempts. Bye.");
        process::exit(1);
    };

    match current.role {
        Role::ADMIN => admin_menu(&args.data_dir, &mut inventory, &mut users, &mut sales),
        Role::CLIENT => client_menu(&args.data_dir, &mut inventory, &mut sales, &current),
        other => println!("User role {other} not recognized."),
    }
}

fn report_load(what: &str, outcome: Result<usize, StoreError>) {
    match outcome {
        Ok(0) => {}
        Ok(skipped) => println!("Loaded {what} with {skipped} skipped row(s)."),
        Err(e) => eprintln!("Error loading {what}: {e}"),
    }
}

/// Linear credential scan with a bounded number of attempts.
fn login(users: &UserRegistry) -> Option<User> {
    for attempt in 1..=LOGIN_MAX_TRIES {
        let username = prompt("Username: ");
        let password = prompt("Password: ");
        if let Some(user) = users
            .list()
            .iter()
            .find(|u| u.username == username && u.password == password)
        {
            println!("Login successful. Welcome, {}!", user.name);
            return Some(user.clone());
        }
        println!("Invalid credentials. Attempt {attempt}/{LOGIN_MAX_TRIES}");
    }
    None
}

fn admin_menu(data_dir: &Path, inventory: &mut Inventory, users: &mut UserRegistry, sales: &mut SalesLog) {
    loop {
        println!();
        println!("--- Admin Menu ---");
        println!("1. Add Product");
        println!("2. Search Product");
        println!("3. Display Inventory");
        println!("4. Update Product");
        println!("5. Save Inventory CSV");
        println!("6. Show Statistics");
        println!("7. Manage Users");
        println!("8. Display Sales");
        println!("9. Save Sales CSV");
        println!("10. Exit");

        match prompt("Choose an option: ").as_str() {
            "1" => add_product_flow(inventory),
            "2" => search_products(inventory),
            "3" => display_inventory(inventory),
            "4" => {
                let name = prompt("Enter product name to update: ");
                if inventory.find_by_name(&name).is_none() {
                    println!("Product not found.");
                    continue;
                }
                update_product_flow(inventory, &name);
            }
            "5" => report_save("inventory", inventory.save_csv(data_dir, WriteMode::Overwrite)),
            "6" => display_statistics(sales),
            "7" => users_menu(data_dir, users),
            "8" => display_sales(sales),
            "9" => report_save("sales", sales.save_csv(data_dir, WriteMode::Overwrite)),
            "10" => {
                println!("Exiting...");
                break;
            }
            _ => println!("You have entered an invalid option"),
        }
    }
}

fn users_menu(data_dir: &Path, users: &mut UserRegistry) {
    loop {
        println!();
        println!("--- Users Menu ---");
        println!("1. Display Users");
        println!("2. Search User");
        println!("3. Add User");
        println!("4. Update User");
        println!("5. Save Users CSV");
        println!("6. Back");

        match prompt("Choose an option: ").as_str() {
            "1" => display_users(users),
            "2" => {
                let query = prompt("Enter name, username or ID to search: ");
                if users.is_empty() {
                    println!("There are no users.");
                    continue;
                }
                let matches = users.search(&query);
                if matches.is_empty() {
                    println!("User not found.");
                } else {
                    println!("Search Results:");
                    for user in matches {
                        print_user(user);
                    }
                }
            }
            "3" => {
                let name = prompt_until("Name: ", is_valid_name, "You have entered an invalid name");
                let username =
                    prompt_until("Username: ", is_valid_name, "You have entered an invalid username");
                let password =
                    prompt_until("Password: ", is_non_empty, "You have entered an invalid password");
                let role = prompt_role("Role (1=Admin, 2=Client): ");
                match users.add(&name, &username, &password, role) {
                    Ok(user) => println!("User {} added successfully.", user.name),
                    Err(e) => println!("{e}"),
                }
            }
            "4" => {
                let name = prompt("Enter current user name to update: ");
                let update = UserUpdate {
                    name: optional_field("New name [leave empty to keep]: ", is_valid_name),
                    username: optional_field("New username [leave empty to keep]: ", is_valid_name),
                    password: optional_field("New password [leave empty to keep]: ", is_non_empty),
                    role: optional_role("New role (1=Admin, 2=Client) [empty to keep]: "),
                };
                match users.update(&name, update) {
                    Ok(()) => println!("User updated successfully."),
                    Err(e) => println!("{e}"),
                }
            }
            "5" => report_save("users", users.save_csv(data_dir, WriteMode::Overwrite)),
            "6" => {
                println!("Returning to Admin menu...");
                break;
            }
            _ => println!("You have entered an invalid option"),
        }
    }
}

fn client_menu(data_dir: &Path, inventory: &mut Inventory, sales: &mut SalesLog, current: &User) {
    loop {
        println!();
        println!("--- Client Menu ---");
        println!("1. Buy Product");
        println!("2. Search Product");
        println!("3. Exit");

        match prompt("Choose an option: ").as_str() {
            "1" => buy_product_flow(data_dir, inventory, sales, current),
            "2" => search_products(inventory),
            "3" => {
                println!("Exiting...");
                break;
            }
            _ => println!("You have entered an invalid option"),
        }
    }
}

fn add_product_flow(inventory: &mut Inventory) {
    loop {
        println!("Add Product");
        let name = prompt_until("Product name: ", is_valid_name, "You have entered an invalid name");
        let author =
            prompt_until("Product author: ", is_valid_name, "You have entered an invalid author");
        let category =
            prompt_until("Product category: ", is_valid_name, "You have entered an invalid category");
        let quantity = prompt_parse("Quantity: ", parse_positive_int, "You have entered an invalid quantity");
        let price = prompt_parse("Price: ", parse_price, "You have entered an invalid price");

        match inventory.add(&name, &author, &category, quantity, price) {
            Ok(product) => println!("Product #{} added successfully.", product.id()),
            Err(e) => {
                println!("{e}");
                let update = prompt_parse(
                    "Do you want to update the existing item? (y/n): ",
                    parse_yes_no,
                    "You have entered an invalid option",
                );
                if update {
                    update_product_flow(inventory, &name);
                }
            }
        }
        display_inventory(inventory);

        let again = prompt_parse(
            "Do you want to add another product? (y/n): ",
            parse_yes_no,
            "You have entered an invalid option",
        );
        if !again {
            println!("Returning to main menu...");
            break;
        }
    }
}

fn update_product_flow(inventory: &mut Inventory, name: &str) {
    let update = ProductUpdate {
        name: optional_field("New product name [leave empty to keep]: ", is_valid_name),
        author: optional_field("New product author [leave empty to keep]: ", is_valid_name),
        category: optional_field("New product category [leave empty to keep]: ", is_valid_name),
        quantity: optional_parse("New quantity [leave empty to keep]: ", parse_positive_int),
        price: optional_parse("New price [leave empty to keep]: ", parse_price),
    };
    match inventory.update(name, update) {
        Ok(()) => println!("Product updated successfully."),
        Err(e) => println!("{e}"),
    }
}

fn buy_product_flow(data_dir: &Path, inventory: &mut Inventory, sales: &mut SalesLog, current: &User) {
    println!("Buy Product");
    let name = prompt("Enter product name to buy: ");
    let Some(product) = inventory.find_by_name(&name) else {
        println!("Product not found.");
        return;
    };
    let available = product.quantity;
    let price = product.price;
    let product_name = product.name.clone();

    let quantity = prompt_parse(
        &format!("Quantity (available {available}): "),
        parse_positive_int,
        "You have entered an invalid quantity",
    );
    if let Err(e) = inventory.decrement_stock(&product_name, quantity) {
        println!("{e}");
        return;
    }

    // Snapshot price and role at sale time; a later product rename or
    // price change must not rewrite this record.
    let total = {
        let sale = sales.record(&current.username, &product_name, quantity, price, current.role);
        println!(
            "Sale #{} registered for {}: {} x {} (${} each) -> Total ${}",
            sale.id(),
            sale.username,
            sale.quantity,
            sale.product,
            sale.price,
            sale.total()
        );
        sale.total()
    };

    // One small append per purchase; the inventory file is rewritten to
    // reflect the new stock level.
    report_save("sales", sales.append_latest_csv(data_dir));
    report_save("inventory", inventory.save_csv(data_dir, WriteMode::Overwrite));
    println!("Purchase successful. Total: ${total}");
}

fn search_products(inventory: &Inventory) {
    println!("Search Product");
    let query = prompt("Enter product name, author, category or ID to search: ");
    if inventory.is_empty() {
        println!("The inventory is empty.");
        return;
    }
    let matches = inventory.search(&query);
    if matches.is_empty() {
        println!("Product not found.");
        return;
    }
    println!("Search Results:");
    for product in matches {
        print_product(product);
    }
}

fn display_inventory(inventory: &Inventory) {
    if inventory.is_empty() {
        println!("The inventory is empty.");
        return;
    }
    println!("Current Inventory:");
    for product in inventory.list() {
        print_product(product);
    }
    println!("Products in inventory: {}", inventory.len());
}

fn display_users(users: &UserRegistry) {
    if users.is_empty() {
        println!("There are no users.");
        return;
    }
    println!("Current Users:");
    for user in users.list() {
        print_user(user);
    }
    println!("Users registered: {}", users.len());
}

fn display_sales(sales: &SalesLog) {
    if sales.is_empty() {
        println!("There are no sales yet.");
        return;
    }
    println!("Current Sales:");
    for sale in sales.list() {
        println!(
            "ID: {} | User: {} | Product: {} | Qty: {} | Price: {} | Total: {}",
            sale.id(),
            sale.username,
            sale.product,
            sale.quantity,
            sale.price,
            sale.total()
        );
    }
    println!("Total sales count: {}", sales.len());
}

fn display_statistics(sales: &SalesLog) {
    let Some(summary) = storefront_rs::stats::summarize(sales.list()) else {
        println!("There are no sales. No statistics to show.");
        return;
    };
    println!("--- Sales Statistics ---");
    println!("Total revenue: ${}", summary.total_revenue);
    println!("Total items sold: {}", summary.total_items);
    println!("{}", "-".repeat(30));
    for (i, entry) in summary.top_products.iter().enumerate() {
        println!("Top product {}. {}: {} sale(s)", i + 1, entry.name, entry.count);
    }
    println!("{}", "-".repeat(30));
    for (i, entry) in summary.top_buyers.iter().enumerate() {
        println!("Top buyer {}. {}: {} purchase(s)", i + 1, entry.name, entry.count);
    }
    println!("------------------------");
}

fn print_product(product: &storefront_rs::Product) {
    println!(
        "ID: {} | Name: {} | Author: {} | Category: {} | Qty: {} | Price: {} | Total: {}",
        product.id(),
        product.name,
        product.author,
        product.category,
        product.quantity,
        product.price,
        product.total()
    );
}

fn print_user(user: &User) {
    println!(
        "ID: {} | Name: {} | Username: {} | Role: {}",
        user.id(),
        user.name,
        user.username,
        user.role.label()
    );
}

fn report_save(what: &str, outcome: Result<(), StoreError>) {
    if let Err(e) = outcome {
        eprintln!("Error saving {what}: {e}");
    }
}

/// Reads one trimmed line from stdin. EOF ends the session.
fn prompt(label: &str) -> String {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => {
            println!();
            process::exit(0);
        }
        Ok(_) => line.trim().to_string(),
        Err(e) => {
            eprintln!("Error reading input: {e}");
            process::exit(1);
        }
    }
}

/// Prompts until `accept` passes.
fn prompt_until(label: &str, accept: impl Fn(&str) -> bool, complaint: &str) -> String {
    loop {
        let value = prompt(label);
        if accept(&value) {
            return value;
        }
        println!("{complaint}");
    }
}

/// Prompts until `parse` succeeds.
fn prompt_parse<T>(label: &str, parse: impl Fn(&str) -> Option<T>, complaint: &str) -> T {
    loop {
        if let Some(value) = parse(&prompt(label)) {
            return value;
        }
        println!("{complaint}");
    }
}

/// Empty input keeps the current value; anything else must pass `accept`.
fn optional_field(label: &str, accept: impl Fn(&str) -> bool) -> Option<String> {
    loop {
        let value = prompt(label);
        if value.is_empty() {
            return None;
        }
        if accept(&value) {
            return Some(value);
        }
        println!("You have entered an invalid value");
    }
}

/// Empty input keeps the current value; anything else must parse.
fn optional_parse<T>(label: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    loop {
        let value = prompt(label);
        if value.is_empty() {
            return None;
        }
        if let Some(parsed) = parse(&value) {
            return Some(parsed);
        }
        println!("You have entered an invalid value");
    }
}

fn prompt_role(label: &str) -> Role {
    prompt_parse(label, parse_role, "You have entered an invalid role")
}

fn optional_role(label: &str) -> Option<Role> {
    optional_parse(label, parse_role)
}

fn parse_role(value: &str) -> Option<Role> {
    match value.trim() {
        "1" => Some(Role::ADMIN),
        "2" => Some(Role::CLIENT),
        _ => None,
    }
}
