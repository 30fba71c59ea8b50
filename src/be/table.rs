//! Plain-text table of a listing, roughly what the old window showed: a
//! "boots next" checkbox, then bectl's columns.
use super::BootEnv;


const HEADERS: [&str; 6] = ["", "Boot Environment", "Active", "Mountpoint",
		"Space", "Created"];


/// Render the records, marking the selected row.
pub fn render(records: &[BootEnv], selected: Option<usize>) -> String
{
	let rows: Vec<[String; 6]> = records.iter().enumerate().map(|(i, be)| {
		let sel = if selected == Some(i) { '>' } else { ' ' };
		let check = if be.active.on_reboot() { "[x]" } else { "[ ]" };
		[
			format!("{sel}{i:>2} {check}"),
			be.name.clone(),
			be.active.to_string(),
			be.mountpoint.clone(),
			be.space.clone(),
			be.created.clone(),
		]
	}).collect();

	// Column widths from whatever's widest
	let mut widths = HEADERS.map(|h| h.chars().count());
	for r in &rows
	{
		for (w, c) in widths.iter_mut().zip(r.iter())
		{
			*w = (*w).max(c.chars().count());
		}
	}

	let mut out = String::new();
	let mut line = |cols: &[&str]| {
		let mut l = String::new();
		for (i, (c, w)) in cols.iter().zip(widths.iter()).enumerate()
		{
			if i > 0 { l.push_str("  "); }
			l.push_str(c);
			// Don't pad out the last column
			if i + 1 < cols.len()
			{
				let pad = w - c.chars().count();
				l.extend(std::iter::repeat(' ').take(pad));
			}
		}
		out.push_str(l.trim_end());
		out.push('\n');
	};

	line(&HEADERS);
	for r in &rows
	{
		let cols: Vec<&str> = r.iter().map(|s| s.as_str()).collect();
		line(&cols);
	}
	if rows.is_empty() { line(&["", "(no boot environments)"]); }

	out
}
