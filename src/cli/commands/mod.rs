mod add;
mod export;
mod list;
mod show;
mod stats;
mod update;

pub use add::cmd_add_chain;
pub use export::cmd_export;
pub use list::cmd_list_chains;
pub use show::cmd_show_chain;
pub use stats::cmd_stats;
pub use update::cmd_update_chain;

use crate::models::chain::{Chain, ChainField};

fn print_chain(chain: &Chain) {
    println!("Chain {}", chain.chain_id);
    for field in ChainField::ALL {
        let value = chain.field(field).unwrap_or("-");
        println!("  {:<13} {}", format!("{field}:"), value);
    }
}
