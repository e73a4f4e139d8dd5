// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn group_arg() -> Arg {
    Arg::new("group")
        .long("group")
        .required(true)
        .help("Group id")
}

fn event_arg() -> Arg {
    Arg::new("event")
        .long("event")
        .required(true)
        .help("Event id")
}

pub fn build_cli() -> Command {
    Command::new("splitplan")
        .about("Group expense settlement and meeting-slot planning")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(output_flags(
            Command::new("balances")
                .about("Show net balances for a group")
                .arg(group_arg()),
        ))
        .subcommand(
            Command::new("settle")
                .about("Plan and record settlement payments")
                .subcommand(output_flags(
                    Command::new("plan")
                        .about("Suggest a short list of transfers that settles the group")
                        .arg(group_arg()),
                ))
                .subcommand(
                    Command::new("pay")
                        .about("Record a planned transfer as paid")
                        .arg(group_arg())
                        .arg(Arg::new("from").long("from").required(true).help("Debtor user id"))
                        .arg(Arg::new("to").long("to").required(true).help("Creditor user id"))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Manage a group's expenses")
                .subcommand(
                    Command::new("add")
                        .about("Create an expense")
                        .arg(group_arg())
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("paid-by")
                                .long("paid-by")
                                .required(true)
                                .help("User id of the payer"),
                        )
                        .arg(
                            Arg::new("share")
                                .long("share")
                                .action(ArgAction::Append)
                                .help("Beneficiary share as user=amount; repeatable"),
                        ),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List a group's expenses")
                        .arg(group_arg()),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete an expense")
                        .arg(group_arg())
                        .arg(Arg::new("id").long("id").required(true).help("Expense id")),
                ),
        )
        .subcommand(
            Command::new("event")
                .about("Meeting-time suggestions for an event")
                .subcommand(output_flags(
                    Command::new("suggest")
                        .about("Rank the best meeting slots by attendance")
                        .arg(event_arg())
                        .arg(
                            Arg::new("max")
                                .long("max")
                                .default_value("3")
                                .value_parser(value_parser!(usize))
                                .help("Maximum number of suggestions"),
                        )
                        .arg(
                            Arg::new("gap-seconds")
                                .long("gap-seconds")
                                .default_value("60")
                                .value_parser(value_parser!(i64))
                                .help("Minimum seconds between suggested start times"),
                        ),
                ))
                .subcommand(
                    Command::new("confirm")
                        .about("Choose a slot as the event's final time")
                        .arg(event_arg())
                        .arg(Arg::new("start").long("start").required(true).help("RFC 3339 start"))
                        .arg(Arg::new("end").long("end").required(true).help("RFC 3339 end")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export settlement plans and slot suggestions")
                .subcommand(
                    Command::new("debts")
                        .about("Export a group's settlement plan")
                        .arg(group_arg())
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("suggestions")
                        .about("Export an event's slot suggestions")
                        .arg(event_arg())
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("remote")
                .about("Configure the backend connection")
                .subcommand(
                    Command::new("set-url")
                        .about("Set the backend base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .about("Store a token pair issued by the backend")
                        .arg(Arg::new("access").long("access").required(true))
                        .arg(Arg::new("refresh").long("refresh").required(true)),
                )
                .subcommand(Command::new("logout").about("Clear stored tokens"))
                .subcommand(Command::new("show").about("Show the current connection settings")),
        )
        .subcommand(Command::new("doctor").about("Check configuration and backend reachability"))
}
