//! Shell commands - parsing, caller-side validation and dispatch to the ledger.
//!
//! Validation here mirrors what a request decoder would do: every argument must be
//! present and well-formed, and amounts must be positive, before the ledger is called.

use crate::{
    core::{Ledger, Money, NewAccount, NewTransaction},
    errors::{Error, Result},
    shell::response::{
        Response, describe_account, describe_operation_type, describe_transaction,
    },
};
use std::str::FromStr;

/// Usage text printed by `help`.
pub const HELP_TEXT: &str = "\
create-account <document_number> <current_balance> <user_id>  Opens an account
post <account_id> <operation_type_id> <amount>                 Posts a transaction
account <account_id>                                          Shows an account
transaction <transaction_id>                                  Shows a transaction
debits <account_id>                                           Lists unsettled debits, oldest first
operation-types                                               Lists operation types
help                                                          Shows this help
quit                                                          Exits";

/// A parsed, validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open an account
    CreateAccount(NewAccount),
    /// Post a transaction
    Post(NewTransaction),
    /// Show an account
    Account(i64),
    /// Show a transaction
    Transaction(i64),
    /// List open debits of an account
    Debits(i64),
    /// List operation types
    OperationTypes,
    /// Print usage
    Help,
    /// Stop reading commands
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(Error::validation("empty command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match name {
            "create-account" => {
                expect_args(name, &args, 3)?;
                Self::CreateAccount(NewAccount {
                    document_number: args[0].to_string(),
                    current_balance: parse_positive_amount("current_balance", args[1])?,
                    user_id: parse_id("user_id", args[2])?,
                })
            }
            "post" => {
                expect_args(name, &args, 3)?;
                Self::Post(NewTransaction {
                    account_id: parse_id("account_id", args[0])?,
                    operation_type_id: parse_id("operation_type_id", args[1])?,
                    amount: parse_positive_amount("amount", args[2])?,
                })
            }
            "account" => {
                expect_args(name, &args, 1)?;
                Self::Account(parse_id("account_id", args[0])?)
            }
            "transaction" => {
                expect_args(name, &args, 1)?;
                Self::Transaction(parse_id("transaction_id", args[0])?)
            }
            "debits" => {
                expect_args(name, &args, 1)?;
                Self::Debits(parse_id("account_id", args[0])?)
            }
            "operation-types" => Self::OperationTypes,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(Error::validation(format!("unknown command '{other}'"))),
        };
        Ok(command)
    }
}

fn expect_args(command: &str, args: &[&str], count: usize) -> Result<()> {
    if args.len() == count {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "'{command}' takes {count} argument(s), got {}",
            args.len()
        )))
    }
}

fn parse_id(field: &str, raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::validation(format!(
            "{field} must be a positive integer, got '{raw}'"
        ))),
    }
}

fn parse_positive_amount(field: &str, raw: &str) -> Result<Money> {
    let amount: Money = raw.parse()?;
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(Error::validation(format!(
            "{field} must be greater than zero, got {amount}"
        )))
    }
}

/// Runs a command against the ledger and shapes the result.
///
/// `Quit` is handled by the caller and renders as an empty success here.
pub async fn execute(ledger: &Ledger, command: Command) -> Response {
    match dispatch(ledger, command).await {
        Ok(response) => response,
        Err(e) => Response::from_error(&e),
    }
}

async fn dispatch(ledger: &Ledger, command: Command) -> Result<Response> {
    let lines = match command {
        Command::CreateAccount(request) => {
            vec![describe_account(&ledger.create_account(request).await?)]
        }
        Command::Post(request) => {
            vec![describe_transaction(&ledger.post_transaction(request).await?)]
        }
        Command::Account(id) => vec![describe_account(&ledger.get_account(id).await?)],
        Command::Transaction(id) => {
            vec![describe_transaction(&ledger.get_transaction(id).await?)]
        }
        Command::Debits(account_id) => ledger
            .open_debits(account_id)
            .await?
            .iter()
            .map(describe_transaction)
            .collect(),
        Command::OperationTypes => ledger
            .operation_types()
            .await?
            .iter()
            .map(describe_operation_type)
            .collect(),
        Command::Help => HELP_TEXT.lines().map(str::to_string).collect(),
        Command::Quit => Vec::new(),
    };
    Ok(Response::ok(lines))
}
