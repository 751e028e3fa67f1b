//! Build prompt generation
//!
//! Serializes a starter template plus the pinned capabilities into a single
//! copy-ready text block for an AI coding assistant. Output is
//! deterministic: capabilities appear in pin order, numbered, each naming
//! the source tool and its repository (or a search fallback when the tool
//! has no repository on record).

use crate::core::pins::SelectedCapability;

/// The closed set of starter templates a prompt can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarterTemplate {
    /// Full-stack Next.js + Keystone starter with admin
    #[default]
    FullStack,
    /// Openfront - open source e-commerce platform
    Openfront,
    /// Openship - order routing & fulfillment platform
    Openship,
    /// Bring your own starter - use the existing codebase as foundation
    Byos,
}

impl StarterTemplate {
    pub fn all() -> &'static [StarterTemplate] {
        &[
            StarterTemplate::FullStack,
            StarterTemplate::Openfront,
            StarterTemplate::Openship,
            StarterTemplate::Byos,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            StarterTemplate::FullStack => "full-stack",
            StarterTemplate::Openfront => "openfront",
            StarterTemplate::Openship => "openship",
            StarterTemplate::Byos => "byos",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StarterTemplate::FullStack => "Next.js + Keystone Starter",
            StarterTemplate::Openfront => "Openfront",
            StarterTemplate::Openship => "Openship",
            StarterTemplate::Byos => "Bring Your Own Starter",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            StarterTemplate::FullStack => "Full-stack template with admin",
            StarterTemplate::Openfront => "Open source e-commerce platform",
            StarterTemplate::Openship => "Order routing & fulfillment platform",
            StarterTemplate::Byos => "Start with what you have",
        }
    }

    /// Repository to clone, when the starter has one
    pub fn source_repo(&self) -> Option<&'static str> {
        match self {
            StarterTemplate::FullStack => Some("https://github.com/junaid33/next-keystone-starter"),
            StarterTemplate::Openfront => Some("https://github.com/openshiporg/openfront"),
            StarterTemplate::Openship => Some("https://github.com/openshiporg/openship"),
            StarterTemplate::Byos => None,
        }
    }

    /// The template-specific description block that opens the prompt.
    /// Empty for "bring your own starter".
    pub fn template_block(&self) -> &'static str {
        match self {
            StarterTemplate::FullStack => {
                "This starter is a full-stack Next.js application that combines Next.js (App Router) with Keystone.js as a headless CMS. It features:\n\
                 \n\
                 - GraphQL API powered by Keystone.js\n\
                 - Custom admin dashboard built with Tailwind CSS and shadcn/ui\n\
                 - Authentication and user management\n\
                 - Database integration with schema management\n\
                 - Modern TypeScript architecture\n\
                 \n\
                 The repository includes comprehensive documentation in the docs/ folder covering the architecture, Keystone integration, and dashboard system."
            }
            StarterTemplate::Openfront => {
                "Openfront is a comprehensive open source e-commerce platform built as a Shopify alternative. It features:\n\
                 \n\
                 - **Complete E-commerce Stack**: Product management, order processing, payment handling, shipping integration\n\
                 - **Multi-Store Support**: Built-in multi-tenant architecture for managing multiple stores\n\
                 - **Modern Architecture**: Next.js 15 + React 19 + KeystoneJS 6 + PostgreSQL + Prisma\n\
                 - **Payment Processing**: Stripe, PayPal integrations with webhook handling\n\
                 - **Shipping & Fulfillment**: Multiple shipping providers, label generation, tracking\n\
                 - **Analytics Dashboard**: Built-in analytics with sales performance and customer insights"
            }
            StarterTemplate::Openship => {
                "Openship is an intelligent order routing and fulfillment platform that automates e-commerce operations. It features:\n\
                 \n\
                 - **Order Routing Engine**: Automatically routes orders from shops to optimal fulfillment channels\n\
                 - **Multi-Platform Integration**: Connect Shopify, WooCommerce, and other e-commerce platforms\n\
                 - **Product Matching**: AI-assisted matching between shop products and supplier products\n\
                 - **Inventory Synchronization**: Real-time inventory tracking across all connected platforms"
            }
            StarterTemplate::Byos => "",
        }
    }

    /// Where adapted implementations should land, phrased per starter
    fn infrastructure(&self) -> &'static str {
        match self {
            StarterTemplate::FullStack => {
                "Next.js + Keystone.js infrastructure. Follow our existing patterns in /features/ directory and integrate with the Keystone schema."
            }
            StarterTemplate::Openfront => {
                "Openfront e-commerce platform infrastructure. Follow the existing patterns in /features/ directory and integrate with the Keystone schema and e-commerce data models."
            }
            StarterTemplate::Openship => {
                "Openship order routing platform infrastructure. Follow the existing patterns in /features/ directory and integrate with the Keystone schema and order processing system."
            }
            StarterTemplate::Byos => {
                "existing codebase architecture. Follow your current patterns and integrate with your existing infrastructure."
            }
        }
    }
}

impl std::str::FromStr for StarterTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full-stack" | "fullstack" => Ok(StarterTemplate::FullStack),
            "openfront" => Ok(StarterTemplate::Openfront),
            "openship" => Ok(StarterTemplate::Openship),
            "byos" => Ok(StarterTemplate::Byos),
            _ => Err(format!(
                "Unknown starter template: '{}' (valid: full-stack, openfront, openship, byos)",
                s
            )),
        }
    }
}

impl std::fmt::Display for StarterTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Repository URL for a pin, falling back to a GitHub search when the tool
/// has no repository on record
pub fn repo_url_or_search(pin: &SelectedCapability) -> String {
    pin.tool_repo.clone().unwrap_or_else(|| {
        format!(
            "https://github.com/search?q={}",
            pin.tool_name.to_lowercase()
        )
    })
}

/// One numbered paragraph for a pinned capability
fn capability_paragraph(pin: &SelectedCapability, template: StarterTemplate) -> String {
    let repo_url = repo_url_or_search(pin);

    if template == StarterTemplate::Byos {
        format!(
            "Implement {tool}'s {name}.\n\n\
             {tool} repository: {repo}\n\n\
             Please understand how this application works and then implement {name}. \
             Use GitHub MCP (if available) or GitHub to find the relevant code that implements {name} and adapt it to your {infra}",
            tool = pin.tool_name,
            name = pin.name,
            repo = repo_url,
            infra = template.infrastructure(),
        )
    } else {
        format!(
            "Implement {tool}'s {name}.\n\n\
             {tool} repository: {repo}\n\n\
             Use GitHub MCP (if available) or GitHub to find the relevant code that implements {name} and adapt it to our {infra}",
            tool = pin.tool_name,
            name = pin.name,
            repo = repo_url,
            infra = template.infrastructure(),
        )
    }
}

/// Generate the full build prompt for a template and pin list.
///
/// Capabilities appear in the order they were pinned. "Bring your own
/// starter" yields an empty prompt when nothing is pinned; template
/// starters always open with their description block.
pub fn generate_prompt(template: StarterTemplate, pins: &[SelectedCapability]) -> String {
    if template == StarterTemplate::Byos {
        if pins.is_empty() {
            return String::new();
        }

        let mut prompt =
            String::from("Implement the following capabilities in your existing codebase:\n\n");
        for (index, pin) in pins.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. {}\n\n",
                index + 1,
                capability_paragraph(pin, template)
            ));
        }
        prompt.push_str(
            "Analyze your existing codebase architecture and integrate these capabilities \
             following your current patterns and conventions. Provide detailed step-by-step \
             instructions that work with your specific tech stack.",
        );
        return prompt.trim().to_string();
    }

    let mut prompt = String::new();
    prompt.push_str(template.template_block());
    prompt.push_str("\n\n");

    if !pins.is_empty() {
        prompt.push_str("Implement the following capabilities:\n\n");
        for (index, pin) in pins.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. {}\n\n",
                index + 1,
                capability_paragraph(pin, template)
            ));
        }
    }

    prompt.push_str(
        "Ensure all implementations follow best practices, are properly tested, and integrate \
         seamlessly with the existing codebase. Provide detailed step-by-step instructions for \
         each capability implementation.",
    );

    prompt.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pins::composite_id;

    fn pin(tool: &str, name: &str, repo: Option<&str>) -> SelectedCapability {
        SelectedCapability {
            id: composite_id(tool, name),
            capability_id: name.to_string(),
            tool_id: tool.to_string(),
            name: name.to_string(),
            description: None,
            category: None,
            complexity: None,
            tool_name: tool.to_string(),
            tool_icon: None,
            tool_color: None,
            tool_repo: repo.map(String::from),
            implementation_notes: None,
            github_path: None,
            documentation_url: None,
        }
    }

    #[test]
    fn test_byos_with_no_pins_is_empty() {
        assert_eq!(generate_prompt(StarterTemplate::Byos, &[]), "");
    }

    #[test]
    fn test_byos_numbers_pins_in_pin_order() {
        let pins = vec![
            pin("ToolA", "X", Some("https://github.com/a/tool-a")),
            pin("ToolB", "Y", None),
        ];
        let prompt = generate_prompt(StarterTemplate::Byos, &pins);

        let first = prompt.find("1. Implement ToolA's X.").unwrap();
        let second = prompt.find("2. Implement ToolB's Y.").unwrap();
        assert!(first < second);
        assert!(prompt.find("3. ").is_none());

        // Known repository is used verbatim; missing one falls back to search
        assert!(prompt.contains("ToolA repository: https://github.com/a/tool-a"));
        assert!(prompt.contains("ToolB repository: https://github.com/search?q=toolb"));
    }

    #[test]
    fn test_template_starter_opens_with_description_block() {
        let prompt = generate_prompt(StarterTemplate::FullStack, &[]);
        assert!(prompt.starts_with("This starter is a full-stack Next.js application"));
        assert!(prompt.ends_with("each capability implementation."));
        assert!(!prompt.contains("Implement the following capabilities:"));
    }

    #[test]
    fn test_template_starter_lists_capabilities_after_block() {
        let pins = vec![pin("Cal.com", "Scheduling", Some("https://github.com/calcom/cal.com"))];
        let prompt = generate_prompt(StarterTemplate::Openfront, &pins);

        assert!(prompt.starts_with("Openfront is a comprehensive open source e-commerce platform"));
        assert!(prompt.contains("Implement the following capabilities:"));
        assert!(prompt.contains("1. Implement Cal.com's Scheduling."));
        assert!(prompt.contains("Openfront e-commerce platform infrastructure."));
    }

    #[test]
    fn test_byos_addresses_your_codebase() {
        let pins = vec![pin("ToolA", "X", None)];
        let byos = generate_prompt(StarterTemplate::Byos, &pins);
        let templated = generate_prompt(StarterTemplate::FullStack, &pins);

        assert!(byos.contains("adapt it to your existing codebase architecture."));
        assert!(templated.contains("adapt it to our Next.js + Keystone.js infrastructure."));
    }

    #[test]
    fn test_output_is_deterministic() {
        let pins = vec![pin("ToolA", "X", None), pin("ToolB", "Y", None)];
        assert_eq!(
            generate_prompt(StarterTemplate::Openship, &pins),
            generate_prompt(StarterTemplate::Openship, &pins)
        );
    }

    #[test]
    fn test_template_parse() {
        assert_eq!(
            "full-stack".parse::<StarterTemplate>().unwrap(),
            StarterTemplate::FullStack
        );
        assert_eq!("byos".parse::<StarterTemplate>().unwrap(), StarterTemplate::Byos);
        assert!("unknown".parse::<StarterTemplate>().is_err());
    }

    #[test]
    fn test_byos_full_prompt_snapshot() {
        let pins = vec![pin("ToolA", "X", Some("https://github.com/a/tool-a"))];
        insta::assert_snapshot!(generate_prompt(StarterTemplate::Byos, &pins), @r"
        Implement the following capabilities in your existing codebase:

        1. Implement ToolA's X.

        ToolA repository: https://github.com/a/tool-a

        Please understand how this application works and then implement X. Use GitHub MCP (if available) or GitHub to find the relevant code that implements X and adapt it to your existing codebase architecture. Follow your current patterns and integrate with your existing infrastructure.

        Analyze your existing codebase architecture and integrate these capabilities following your current patterns and conventions. Provide detailed step-by-step instructions that work with your specific tech stack.
        ");
    }
}
