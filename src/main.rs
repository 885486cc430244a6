//! # copy-sort CLI
//!
//! ## Usage
//! ```bash
//! copy-sort /media/card ~/Backup
//! copy-sort --manifest ~/card.manifest /media/card ~/Backup
//! ```

mod cli;

use copy_sort::Result;

fn main() -> Result<()> {
    cli::run()
}
