use super::{success, Out};
use crate::app::Explorer;
use crate::runner::prompt::Prompter;
use crate::ui::format::render_permissions;

pub fn view(ex: &Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let name = p.input("Enter filename")?;
    let info = ex.permissions(&name)?;
    writeln!(out, "{}", render_permissions(&info))?;
    Ok(())
}

pub fn chmod(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let name = p.input("Enter filename")?;
    let mode = p.input("Enter permissions (octal, e.g. 755)")?;
    let applied = ex.chmod(&name, &mode)?;
    success(out, format!("Permissions of {} set to {applied:o}", name.trim()))
}

pub fn chown(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let name = p.input("Enter filename")?;
    let owner = p.input("Enter owner username (or press Enter to skip)")?;
    let group = p.input("Enter group name (or press Enter to skip)")?;
    let path = ex.chown(&name, &owner, &group)?;
    success(out, format!("Owner/Group changed successfully for {}", path.display()))
}
