// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print JSON").action(ArgAction::SetTrue))
        .arg(
            arg!(--jsonl "Print one JSON object per line")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
}

fn date_arg() -> Arg {
    arg!(--date <DATE> "Day as YYYY-MM-DD (default: today)").required(false)
}

fn income_flag() -> Arg {
    arg!(--income "Use the income lists instead of expense").action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("tripledger")
        .about("Multi-currency trip expense ledger with per-day locks")
        .version(clap::crate_version!())
        .arg(
            arg!(--db <PATH> "Data file to use instead of the platform data dir")
                .required(false)
                .global(true)
                .env("TRIPLEDGER_DB"),
        )
        .arg(
            arg!(-v --verbose "Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the data file"))
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(date_arg())
                        .arg(
                            arg!(--person <PERSON> "Who paid or received (default: last used)")
                                .required(false),
                        )
                        .arg(arg!(--amount <AMOUNT> "Whole amount, e.g. 1,500").required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(
                            arg!(--currency <CODE> "Currency code (default: last used)")
                                .required(false),
                        )
                        .arg(
                            arg!(--income "Record income instead of an expense")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list").about("List a day's transactions").arg(date_arg()),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(date_arg())
                        .arg(
                            arg!(--id <ID>)
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("lock")
                .about("Close or reopen days")
                .subcommand(Command::new("toggle").about("Flip a day's lock").arg(date_arg()))
                .subcommand(json_args(
                    Command::new("status")
                        .about("Show a day's lock, or every locked day")
                        .arg(arg!(--date <DATE>).required(false)),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries")
                .subcommand(json_args(
                    Command::new("day").about("Totals per currency for a day").arg(date_arg()),
                ))
                .subcommand(json_args(
                    Command::new("spenders")
                        .about("Expense per person in base currency (whole trip unless --date)")
                        .arg(arg!(--date <DATE>).required(false)),
                ))
                .subcommand(json_args(
                    Command::new("trip").about("Income and expense over the whole trip"),
                )),
        )
        .subcommand(
            Command::new("tags")
                .about("Recently used persons and categories")
                .subcommand(json_args(Command::new("list").arg(income_flag())))
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--person <PERSON>).required(false))
                        .arg(arg!(--category <CATEGORY>).required(false))
                        .arg(income_flag()),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(arg!(--person <PERSON>).required(false))
                        .arg(arg!(--category <CATEGORY>).required(false))
                        .arg(income_flag()),
                ),
        )
        .subcommand(
            Command::new("currency")
                .about("Currencies and the default for new entries")
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("use").arg(arg!(<CODE>).required(true))),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(arg!(--format <FMT> "csv|json").required(true))
                    .arg(arg!(--out <PATH>).required(true)),
            ),
        )
}
