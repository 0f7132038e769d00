// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month as YYYY-MM (default: current month)")
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .version(clap::crate_version!())
        .about("Track income and expenses, budget by month, chart and export the results")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("POCKETBOOK_DB")
                .value_parser(value_parser!(PathBuf))
                .help("SQLite database path (default: platform data dir)"),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .global(true)
                .help("Formatting locale for this run: en-US | en-GB | de-DE"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging (RUST_LOG takes precedence)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("color").long("color").default_value("#64748b"))
                        .arg(Arg::new("icon").long("icon").default_value("Tag"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income | expense | both"),
                        ),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income | expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget limits")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(json_flags(Command::new("list").arg(month_arg())))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly statistics, budget progress and period insights")
                .subcommand(json_flags(Command::new("stats").arg(month_arg())))
                .subcommand(json_flags(Command::new("budgets").arg(month_arg())))
                .subcommand(json_flags(
                    Command::new("insights").arg(
                        Arg::new("months")
                            .long("months")
                            .default_value("6")
                            .value_parser(value_parser!(u32)),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("breakdown").arg(
                        Arg::new("months")
                            .long("months")
                            .default_value("6")
                            .value_parser(value_parser!(u32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("chart")
                .about("Chart series: expense distribution or 6-month trend")
                .subcommand(json_flags(
                    Command::new("distribution").arg(
                        Arg::new("range")
                            .long("range")
                            .default_value("current")
                            .help("current | last3 | last6"),
                    ),
                ))
                .subcommand(json_flags(Command::new("trend"))),
        )
        .subcommand(
            Command::new("export")
                .about("Write CSV exports")
                .subcommand(
                    Command::new("transactions").arg(
                        Arg::new("out-dir")
                            .long("out-dir")
                            .default_value(".")
                            .value_parser(value_parser!(PathBuf)),
                    ),
                )
                .subcommand(
                    Command::new("summary").arg(
                        Arg::new("out-dir")
                            .long("out-dir")
                            .default_value(".")
                            .value_parser(value_parser!(PathBuf)),
                    ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Persistent settings")
                .subcommand(Command::new("set-locale").arg(Arg::new("tag").required(true)))
                .subcommand(Command::new("show")),
        )
        .subcommand(Command::new("doctor").about("Report dangling references and duplicate budgets"))
}
