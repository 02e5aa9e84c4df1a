use clap::ValueEnum;
use habitroom_core::Tab;

use super::{open_tracker, print_json, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum TabArg {
    Timer,
    Daily,
    Weekly,
    Monthly,
    Goals,
}

impl From<TabArg> for Tab {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::Timer => Tab::Timer,
            TabArg::Daily => Tab::Daily,
            TabArg::Weekly => Tab::Weekly,
            TabArg::Monthly => Tab::Monthly,
            TabArg::Goals => Tab::Goals,
        }
    }
}

pub fn run(tab: TabArg) -> CliResult {
    let mut tracker = open_tracker()?;
    print_json(&tracker.switch_tab(tab.into())?)
}
