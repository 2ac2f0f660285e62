// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_details::AllFixtures;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    /// Log more (repeat for trace output)
    #[clap(long, short, global = true, parse(from_occurrences))]
    verbose: usize,

    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Minimize random functions and check every minimum cover
    CheckFunctions {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
        #[clap(long, default_value_t = 4)]
        max_arity: usize,
        #[clap(long, default_value = "logic-lab-functions")]
        seed: String,
    },
    /// Minimize random machines and check they still behave the same
    CheckMachines {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
        #[clap(long, default_value = "logic-lab-machines")]
        seed: String,
    },
    /// Write random functions and their minimum covers to the fixture directory
    WriteFunctions {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
        #[clap(long, default_value_t = 4)]
        max_arity: usize,
        #[clap(long, default_value = "logic-lab-functions")]
        seed: String,
    },
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::CheckFunctions {
                count,
                max_arity,
                seed,
            } => {
                let summary = AllFixtures::check_functions(count, max_arity, &seed)?;
                println!("{}", summary);
            }
            Self::CheckMachines { count, seed } => {
                let summary = AllFixtures::check_machines(count, &seed)?;
                println!("{}", summary);
            }
            Self::WriteFunctions {
                count,
                max_arity,
                seed,
            } => {
                let path = AllFixtures::get().write_functions(count, max_arity, &seed)?;
                println!("wrote {}", path);
            }
        }
        Ok(())
    }
}
