use anyhow::{anyhow, bail, Context};

use pocketfx_core::accounts::Account;
use pocketfx_core::exchange::{AccountSelection, AmountInput};
use pocketfx_core::session::ExchangeSession;

pub const HELP: &str = "\
Commands:
  rates                      show the current rate snapshot
  accounts                   list accounts and the exchange selection
  select <from> <to>         choose source and destination (number, currency or id, `-` keeps a side)
  from [amount]              amount to debit from the source (no amount clears it)
  to [amount]                amount to credit to the destination (no amount clears it)
  clear                      clear both amounts
  exchange                   apply the entered amounts
  convert <n> <A> to <B>     convert with the current rates
  rate <A> <B>               rate for one unit of A in B
  reload                     fetch rates again
  help                       show this text
  quit                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Rates,
    Accounts,
    Select {
        from: Option<String>,
        to: Option<String>,
    },
    InputFrom(String),
    InputTo(String),
    Clear,
    Exchange,
    Convert(String),
    Rate(String, String),
    Reload,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("rates", []) => Command::Rates,
            ("accounts" | "ls", []) => Command::Accounts,
            ("select", [from, to]) => Command::Select {
                from: side_reference(from),
                to: side_reference(to),
            },
            ("from", [amount]) => Command::InputFrom(amount.to_string()),
            ("to", [amount]) => Command::InputTo(amount.to_string()),
            ("from", []) => Command::InputFrom(String::new()),
            ("to", []) => Command::InputTo(String::new()),
            ("clear", []) => Command::Clear,
            ("exchange", []) => Command::Exchange,
            ("convert", [_, _, _, _]) => Command::Convert(rest.to_string()),
            ("rate", [from, to]) => Command::Rate(from.to_string(), to.to_string()),
            ("reload", []) => Command::Reload,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            ("", []) => bail!("Empty command"),
            _ => bail!("Unrecognized command '{}'. Type `help` for usage.", line),
        };
        Ok(command)
    }
}

fn side_reference(arg: &str) -> Option<String> {
    (arg != "-").then(|| arg.to_string())
}

/// Resolves a 1-based list position, a currency code or an account id.
fn resolve_account(session: &ExchangeSession, reference: &str) -> anyhow::Result<String> {
    let accounts = session.accounts();
    if let Ok(position) = reference.parse::<usize>() {
        return accounts
            .get(position.wrapping_sub(1))
            .map(|a| a.id().to_string())
            .ok_or_else(|| anyhow!("No account at position {}", position));
    }
    accounts
        .iter()
        .find(|a| a.currency().eq_ignore_ascii_case(reference) || a.id() == reference)
        .map(|a| a.id().to_string())
        .ok_or_else(|| anyhow!("No account matches '{}'", reference))
}

/// Runs `command` and returns the text to print.
pub async fn execute(session: &mut ExchangeSession, command: Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Rates => match session.rates() {
            Some(snapshot) => {
                let mut lines = vec![format!(
                    "Base {} at {}",
                    snapshot.base,
                    snapshot
                        .fetched_at()
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| snapshot.timestamp.to_string())
                )];
                lines.extend(
                    snapshot
                        .rates
                        .iter()
                        .map(|(code, rate)| format!("  {:<4} {}", code, rate)),
                );
                lines.join("\n")
            }
            None => "No rates loaded".to_string(),
        },
        Command::Accounts => {
            let selected = session.selected_accounts().clone();
            session
                .accounts()
                .iter()
                .enumerate()
                .map(|(i, account)| {
                    let marker = match (
                        selected.from.as_deref() == Some(account.id()),
                        selected.to.as_deref() == Some(account.id()),
                    ) {
                        (true, true) => "from/to",
                        (true, false) => "from",
                        (false, true) => "to",
                        (false, false) => "",
                    };
                    format!(
                        "{:>2}. {:<4} {:>14}  {:<7} {}",
                        i + 1,
                        account.currency(),
                        session.format(account.balance(), account.currency()),
                        marker,
                        account.id()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        Command::Select { from, to } => {
            let from_id = from.map(|r| resolve_account(session, &r)).transpose()?;
            let to_id = to.map(|r| resolve_account(session, &r)).transpose()?;
            session.select_accounts(AccountSelection { from_id, to_id });
            describe_selection(session)
        }
        Command::InputFrom(raw) => {
            let input = AmountInput::parse(&raw)?;
            session.set_input_from(input);
            describe_inputs(session)
        }
        Command::InputTo(raw) => {
            let input = AmountInput::parse(&raw)?;
            session.set_input_to(input);
            describe_inputs(session)
        }
        Command::Clear => {
            session.clear_inputs();
            describe_inputs(session)
        }
        Command::Exchange => {
            let receipt = session.exchange()?;
            format!(
                "{} now {}, {} now {}",
                receipt.debit.currency,
                session.format(receipt.debit.new_balance, &receipt.debit.currency),
                receipt.credit.currency,
                session.format(receipt.credit.new_balance, &receipt.credit.currency)
            )
        }
        Command::Convert(expression) => {
            let request = expression.to_ascii_uppercase();
            let target = request.split_whitespace().last().unwrap_or_default();
            let value = session.convert_expression(&expression)?;
            session.format(value, target)
        }
        Command::Rate(from, to) => {
            let (from, to) = (from.to_ascii_uppercase(), to.to_ascii_uppercase());
            let rate = session.get_rate(&from, &to)?;
            format!("1 {} = {} {}", from, rate.round_dp(6).normalize(), to)
        }
        Command::Reload => {
            session.init().await.context("Reloading rates failed")?;
            format!("Loaded {} accounts", session.accounts().len())
        }
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(output)
}

fn describe_selection(session: &ExchangeSession) -> String {
    let describe = |account: Option<&Account>| {
        account
            .map(|a| format!("{} ({})", a.currency(), session.format(a.balance(), a.currency())))
            .unwrap_or_else(|| "none".to_string())
    };
    format!(
        "from: {}  to: {}",
        describe(session.selected_from()),
        describe(session.selected_to())
    )
}

fn describe_inputs(session: &ExchangeSession) -> String {
    let describe = |input: AmountInput| {
        input
            .value()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "from: {}  to: {}",
        describe(session.input_from()),
        describe(session.input_to())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::main_lib::offline_snapshot;
    use pocketfx_core::events::NoOpDomainEventSink;
    use pocketfx_core::session::SessionConfig;
    use pocketfx_rates::StaticRatesProvider;
    use rust_decimal_macros::dec;

    fn session() -> ExchangeSession {
        let mut session = ExchangeSession::new(
            SessionConfig::default(),
            Arc::new(StaticRatesProvider::new(offline_snapshot())),
            Arc::new(NoOpDomainEventSink),
        );
        session.set_rates(offline_snapshot().filtered(&SessionConfig::default().symbols));
        session
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  rates ").unwrap(), Command::Rates);
        assert_eq!(
            Command::parse("select 1 EUR").unwrap(),
            Command::Select {
                from: Some("1".to_string()),
                to: Some("EUR".to_string()),
            }
        );
        assert_eq!(
            Command::parse("select - gbp").unwrap(),
            Command::Select {
                from: None,
                to: Some("gbp".to_string()),
            }
        );
        assert_eq!(
            Command::parse("from 30").unwrap(),
            Command::InputFrom("30".to_string())
        );
        assert_eq!(
            Command::parse("to").unwrap(),
            Command::InputTo(String::new())
        );
        assert_eq!(Command::parse("clear").unwrap(), Command::Clear);
        assert_eq!(
            Command::parse("convert 10 eur to gbp").unwrap(),
            Command::Convert("10 eur to gbp".to_string())
        );
        assert_eq!(Command::parse("EXIT").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("select 1").is_err());
        assert!(Command::parse("buy bitcoin").is_err());
    }

    #[tokio::test]
    async fn test_select_and_exchange() {
        let mut session = session();

        let out = execute(
            &mut session,
            Command::Select {
                from: Some("usd".to_string()),
                to: Some("2".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(out, "from: USD ($100.00)  to: EUR (€100.00)");

        execute(&mut session, Command::InputFrom("30".to_string()))
            .await
            .unwrap();
        execute(&mut session, Command::InputTo("27.6".to_string()))
            .await
            .unwrap();
        let out = execute(&mut session, Command::Exchange).await.unwrap();
        assert_eq!(out, "USD now $70.00, EUR now €127.60");

        let balances: Vec<_> = session.accounts().iter().map(|a| a.balance()).collect();
        assert_eq!(balances, vec![dec!(70), dec!(127.6), dec!(100), dec!(100)]);
    }

    #[tokio::test]
    async fn test_bare_side_command_clears_only_that_side() {
        let mut session = session();
        execute(&mut session, Command::InputFrom("30".to_string()))
            .await
            .unwrap();
        execute(&mut session, Command::InputTo("27".to_string()))
            .await
            .unwrap();

        let command = Command::parse("to").unwrap();
        let out = execute(&mut session, command).await.unwrap();

        assert_eq!(out, "from: 30  to: -");
        assert_eq!(session.input_from(), AmountInput::Value(dec!(30)));
        assert!(session.input_to().is_empty());
    }

    #[tokio::test]
    async fn test_errors_are_reported() {
        let mut session = session();

        assert!(execute(&mut session, Command::Exchange).await.is_err());
        assert!(execute(&mut session, Command::InputFrom("abc".to_string()))
            .await
            .is_err());
        assert!(execute(
            &mut session,
            Command::Select {
                from: Some("9".to_string()),
                to: None,
            }
        )
        .await
        .is_err());
    }

    #[tokio::test]
    async fn test_convert_and_rate() {
        let mut session = session();

        let out = execute(&mut session, Command::Convert("100 usd to eur".to_string()))
            .await
            .unwrap();
        assert_eq!(out, "€92.00");

        let out = execute(
            &mut session,
            Command::Rate("usd".to_string(), "uah".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(out, "1 USD = 41.25 UAH");
    }
}
