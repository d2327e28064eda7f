use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};

const CONFIG_SAMPLE: &str = r#"[site]
name = "Savanna Trails"
tagline = "Small group safaris across East and Southern Africa"
established = {{TODAY}}

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
template_dir = "res/template"
public_dir = "res/public"
catalog = "res/content.toml"

[defaults]
page_size = 6
featured_count = 2
placeholder_image = "/public/images/placeholder.jpg"

[server]
address = "0.0.0.0"
port = 8001

# [log]
# level = "Info"
# log_to_console = true

# Blog posts and lodges can be served by another content provider
# [sources]
# blogs_url = "https://example.com/api/blogs"
# lodges_url = "https://example.com/api/lodges"
# timeout_secs = 10
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(get_sample_cfg().as_bytes())
}

fn get_sample_cfg() -> String {
    let current_local: DateTime<Local> = Local::now();
    let today = current_local.format("%Y-%m-%d").to_string();
    CONFIG_SAMPLE.replace("{{TODAY}}", &today)
}
