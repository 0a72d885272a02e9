use serde::Serialize;

use crossforge_core::target::{targets_by_family, StaticLinkSupport, TargetFamily, TargetId};

pub struct TargetsArgs {
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct TargetListing {
    pub id: TargetId,
    pub family: TargetFamily,
    pub cc: String,
    pub static_link: StaticLinkSupport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<TargetId>,
}

#[derive(Debug, Serialize)]
pub struct TargetGroup {
    pub family: TargetFamily,
    pub targets: Vec<TargetListing>,
}

pub struct TargetsOutcome {
    pub groups: Vec<TargetGroup>,
    pub rendered: String,
}

pub fn run(args: TargetsArgs) -> Result<TargetsOutcome, String> {
    let groups: Vec<TargetGroup> = targets_by_family()
        .into_iter()
        .map(|(family, ids)| TargetGroup {
            family,
            targets: ids.into_iter().map(listing).collect(),
        })
        .collect();
    let rendered = if args.json {
        super::to_json(&groups)?
    } else {
        render_text(&groups)
    };
    Ok(TargetsOutcome { groups, rendered })
}

fn listing(id: TargetId) -> TargetListing {
    let profile = id.descriptor().profile();
    TargetListing {
        id,
        family: id.family(),
        cc: profile.compiler_c_command(),
        static_link: profile.static_link_support,
        alias_of: id.alias_of(),
    }
}

fn render_text(groups: &[TargetGroup]) -> String {
    let mut output = String::new();
    for group in groups {
        output.push_str(&format!("{}:\n", group.family.label()));
        for target in &group.targets {
            match target.alias_of {
                Some(substitute) => output.push_str(&format!(
                    "  {:<20} (uses {} toolchain)\n",
                    target.id, substitute
                )),
                None => output.push_str(&format!("  {:<20} {}\n", target.id, target.cc)),
            }
        }
    }
    output
}
