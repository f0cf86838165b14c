//! CLI command for the enriched listing

use super::{CliContext, FilterArgs};
use crate::display::table::format_record_table;
use crate::error::GastosResult;

/// Print the logged-in user's records matching the filters
pub fn handle_list_command(ctx: &CliContext, filters: &FilterArgs) -> GastosResult<()> {
    let locale = ctx.locale();
    let criteria = filters.to_criteria(&locale)?;

    let service = ctx.load_reports()?;
    let records = service.filtered(&criteria);

    print!("{}", format_record_table(&records, &locale));
    Ok(())
}
