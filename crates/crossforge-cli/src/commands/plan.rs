use std::path::PathBuf;

use crossforge_core::build_plan::{plan_for, BuildPlan};

use super::detect::{self, DetectArgs};

pub struct PlanArgs {
    pub project_dir: PathBuf,
    pub target: Option<String>,
    pub json: bool,
}

pub struct PlanOutcome {
    pub plan: BuildPlan,
    pub rendered: String,
}

pub fn run(args: PlanArgs) -> Result<PlanOutcome, String> {
    let config = super::load_config(&args.project_dir)?;
    let target = super::select_target(args.target.as_deref(), &config)?;
    let detected = detect::run(DetectArgs {
        project_dir: args.project_dir,
    })?;
    let plan = plan_for(detected.classification, target).map_err(|err| err.to_string())?;
    let rendered = if args.json {
        super::to_json(&plan)?
    } else {
        render_text(&plan)
    };
    Ok(PlanOutcome { plan, rendered })
}

fn render_text(plan: &BuildPlan) -> String {
    let mut output = format!("# {}", plan.classification);
    if let Some(target) = plan.target {
        output.push_str(&format!(" -> {}", target));
    }
    output.push('\n');
    for step in &plan.steps {
        output.push_str(&step.to_string());
        output.push('\n');
    }
    output
}
