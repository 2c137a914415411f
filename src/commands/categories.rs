//! Categories command handler.

use crate::output;

pub(crate) fn run_categories_command() {
    print!("{}", output::render_categories());
}
