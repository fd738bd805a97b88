//! Page renderer: generates the self-contained file-tree viewer
//!
//! The stylesheet and script are static; only the title and the sidebar
//! tree vary between reports.

use super::{escape_html, TreeMarkup};
use crate::error::BeautifyError;
use crate::tree::FileTree;

/// Marker the tree markup replaces in the body template
const TREE_SLOT: &str = "{{TREE}}";

/// Renders the final HTML document
#[derive(Debug, Clone)]
pub struct PageRenderer {
    title: String,
    tree: TreeMarkup,
}

impl PageRenderer {
    pub fn new(title: impl Into<String>, show_coverage: bool) -> Self {
        Self {
            title: title.into(),
            tree: TreeMarkup::new(show_coverage),
        }
    }

    /// Generate the full page
    pub fn render(&self, tree: &FileTree) -> Result<String, BeautifyError> {
        let (before, after) = Self::template_body()
            .split_once(TREE_SLOT)
            .ok_or_else(|| BeautifyError::Template("body template has no tree slot".into()))?;

        let markup = self.tree.render(tree);
        let mut html = String::with_capacity(16_384 + markup.len());
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str("<link href=\"https://fonts.cdnfonts.com/css/noto-sans\" rel=\"stylesheet\">\n");
        html.push_str("<title>");
        html.push_str(&escape_html(&self.title));
        html.push_str("</title>\n");
        html.push_str(Self::template_style());
        html.push_str("</head>\n");
        html.push_str(before);
        html.push_str(&markup);
        html.push_str(after);
        html.push_str(Self::template_script());
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }

    // ─── HTML template pieces ────────────────────────────────────────────

    fn template_style() -> &'static str {
        r##"<style>
body{margin:0;color:rgb(80,80,80)}
ul,.fileUL{list-style-type:none}
ul{padding-inline-start:10px}
.fileUL{margin:0;padding:35px 10px 15px 15px}

/* ── Tree ── */
.directory,.source-file{color:#919cae;font-size:.9rem;user-select:none}
.directory:hover,.source-file:hover{cursor:pointer}
.directory::before{content:"›";color:#919cae;display:inline-block;margin-right:6px}
.caret-down::before{transform:rotate(90deg)}
.nested{height:0;max-height:0;overflow-y:hidden;transition:height 2s linear}
.nested.active{height:var(--height);max-height:999999px;transition:height 2s linear}
.selected{background-color:#919cae;color:white}
.coverage{font-size:.75rem;margin-left:4px}

/* ── Layout ── */
.container-fluid{width:100%;padding-right:15px;padding-left:15px;margin-right:auto;margin-left:auto}
.row{display:-ms-flexbox;display:flex;-ms-flex-wrap:wrap;flex-wrap:wrap;margin-right:-15px;margin-left:-15px}
.file-tree,#code-area{height:calc(100vh + 30px);width:100%;float:left;overflow:scroll}
.file-tree{font-family:'Noto Sans',sans-serif;cursor:default;background:#19202a}
#code-area{background:#1d242f}

/* ── Source ── */
pre{color:rgb(80,80,80);font-family:Menlo,monospace;font-weight:bold;line-height:8px;overflow-y:hidden;padding:15px 0 15px 15px}
pre::-webkit-scrollbar{display:none}

/* Coverage colors, as in the Go report */
.cov0{color:rgb(192,0,0)}
.cov1{color:rgb(128,128,128)}
.cov2{color:rgb(116,140,131)}
.cov3{color:rgb(104,152,134)}
.cov4{color:rgb(92,164,137)}
.cov5{color:rgb(80,176,140)}
.cov6{color:rgb(68,188,143)}
.cov7{color:rgb(56,200,146)}
.cov8{color:rgb(44,212,149)}
.cov9{color:rgb(32,224,152)}
.cov10{color:rgb(20,236,155)}
</style>
"##
    }

    fn template_body() -> &'static str {
        r##"<body style="display:flex">
<div class="container-fluid">
<div class="row" id="content">
<div class="file-tree" style="flex:2">
<ul class="fileUL">
{{TREE}}</ul>
</div>
<div style="flex:10" id="code-area"></div>
</div>
</div>
"##
    }

    fn template_script() -> &'static str {
        r##"<script>
(function(){
  var dirs = document.getElementsByClassName("directory");
  for (var i = 0; i < dirs.length; i++) {
    dirs[i].addEventListener("click", function () {
      this.parentElement.querySelector(".nested").classList.toggle("active");
      this.classList.toggle("caret-down");
    });
  }

  var select = function () {
    var selected = document.getElementsByClassName("selected");
    while (selected.length) selected[0].classList.remove("selected");
    this.classList.add("selected");
    var area = document.getElementById("code-area");
    var code = this.getElementsByTagName("pre")[0];
    area.scrollTo(0, 0);
    area.innerHTML = "<pre>" + code.innerHTML + "</pre>";
  };

  var files = document.getElementsByClassName("source-file");
  for (var j = 0; j < files.length; j++) {
    files[j].addEventListener("click", select, false);
  }
})();
</script>
"##
    }
}
