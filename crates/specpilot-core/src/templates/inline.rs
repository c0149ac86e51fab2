//! Fixed document bodies. Markdown bodies get the shared front-matter
//! prepended by [`super::inline_template`].

pub const README: &str = r#"# {{projectName}} Specifications

This folder contains the structured specification documents for {{projectName}}.

## Quick Start: Populate Your Specs

The documents are generated with placeholder content. Fill them in with an AI
assistant:

1. Open [`development/prompts.md`](development/prompts.md) and copy the
   fenced block under "First-Use Onboarding Prompt".
2. Paste it into the AI chat of your editor and run it. The assistant
   inspects the codebase and populates every spec file.
3. Review the results, refine them, then run `specpilot validate`.

## File Structure
- `project/`: metadata, requirements and the project plan
- `architecture/`: design and API specification
- `planning/`: tasks and roadmap
- `quality/`: test strategy
- `development/`: docs, context and the prompts log

## Commands
```bash
# Validate the spec tree
specpilot validate

# Record a new requirement description
specpilot specify "what the project should do"
```

For AI guidelines and the prompt history see
[`development/prompts.md`](development/prompts.md).
"#;

pub const REQUIREMENTS: &str = r#"# {{projectName}} Requirements

## Project Overview
{{description}}

## Functional Requirements
_Add requirements as REQ-001, REQ-002, ... with priority and status._

## Non-Functional Requirements
_Performance, security and availability targets._

## User Stories
_As a <role>, I want <capability> so that <benefit>._

## Cross-References
- Architecture: ../architecture/architecture.md
- API: ../architecture/api.yaml
- Project config: ./project.yaml

---
*Last updated: {{lastUpdated}}*
"#;

pub const API_YAML: &str = r#"# {{projectName}} API Specification
# meta: project={{projectName}} language={{language}} framework={{#if framework}}{{framework}}{{else}}none{{/if}} updated={{lastUpdated}}
openapi: 3.0.3
info:
  title: {{yaml projectName " API"}}
  description: {{yaml description}}
  version: "1.0.0"
paths: {}
"#;

pub const TASKS: &str = r#"# {{projectName}} Task Management

## Project Status: In Progress

## Backlog
- [ ] TASK-001: Set up the project foundation
- [ ] TASK-002: Implement the core features

## In Progress
_Nothing yet._

## Completed
- [x] TASK-000: Generate the specification tree ({{currentDate}})

## Cross-References
- Roadmap: ./roadmap.md
- Requirements: ../project/requirements.md
- Project config: ../project/project.yaml

---
*Last updated: {{lastUpdated}}*
"#;

pub const ROADMAP: &str = r#"# {{projectName}} Development Roadmap

## Milestones

### Phase 1: Foundation
- [x] Project initialization
- [ ] Core development

### Phase 2: Hardening
- [ ] Test coverage goals met
- [ ] Documentation complete

## Cross-References
- Tasks: ./tasks.md
- Requirements: ../project/requirements.md

---
*Last updated: {{lastUpdated}}*
"#;

pub const DOCS: &str = r#"# {{projectName}} Development Documentation

## Getting Started
_Describe how to install dependencies, build and run {{projectName}}._

## Architecture
See ../architecture/architecture.md.

## Deployment
_Describe environments and the release process._

## Contributing
Maintained by {{join contributors ", "}}.

## Cross-References
- Context: ./context.md
- Roadmap: ../planning/roadmap.md
- Tasks: ../planning/tasks.md
- Project config: ../project/project.yaml

---
*Last updated: {{lastUpdated}}*
"#;

pub const CONTEXT: &str = r#"# {{projectName}} Development Context

## Project Memory
- {{currentDate}}: Specification tree generated for {{projectName}} ({{language}}{{#if framework}}, {{framework}}{{/if}}).

## Key Decisions
_Record architectural decisions as they are made._

## Known Issues
_None recorded._

## Cross-References
- Docs: ./docs.md
- Roadmap: ../planning/roadmap.md
- Project config: ../project/project.yaml

---
*Last updated: {{lastUpdated}}*
"#;

pub const PROJECT_PLAN: &str = r#"# {{projectName}} Project Plan

## Project Overview
{{description}}

## Scope
_What is in and out of scope for the first release._

## Team
- Author: {{author}}

## Cross-References
- Roadmap: ../planning/roadmap.md
- Tasks: ../planning/tasks.md

---
*Last updated: {{lastUpdated}}*
"#;

pub const PROMPTS: &str = r#"# Development Prompts Log

## Overview
This file (prompts.md) records ALL AI interactions for {{projectName}}. Update
.specs/prompts.md with every AI interaction and development prompt.

**MANDATE**: Update this log with every AI interaction, in chronological order.

## First-Use Onboarding Prompt

After generating the `.specs` directory, give this prompt to your AI
assistant so it populates every specification file from the codebase:

~~~
You are onboarding as the specification co-pilot for this repository. The
.specs directory was just generated. Inspect the codebase and populate every
.specs file following these conventions:

1. IDs use semantic prefixes (REQ-, TASK-, ARCH-, TEST-) with zero-padded
   numbers, e.g. REQ-001.
2. Status is one of: not-started, in-progress, completed, blocked, deprecated.
3. Priority is one of: critical, high, medium, low.
4. Dates use ISO 8601 (YYYY-MM-DD).
5. YAML uses two-space indentation and includes all required fields.
6. Link requirements to tasks, tasks to tests, architecture to code.

Files:
- project/project.yaml: name, version, language, rules, dependencies
- project/requirements.md: functional and non-functional requirements
- architecture/architecture.md: overview, components, data flow, decisions
- architecture/api.yaml: OpenAPI 3 description of the public interface
- planning/tasks.md: backlog, in progress, completed
- planning/roadmap.md: milestones with dates and status
- quality/tests.md: strategy, test cases, coverage goals
- development/docs.md: getting started, deployment, contributing
- development/context.md: project memory, key decisions, known issues

Do not invent features that do not exist in the code. Flag uncertainties
with TODO comments. Finish with a summary of gaps, risks and next steps.
~~~

## Latest Entries

### {{currentDate}}: Specification tree generated
- **Prompt**: "Generate the specification tree for {{projectName}}"
- **Outcome**: All spec documents created with placeholder content

## Prompt History

| Date | User | Prompt Summary | Context |
|------|------|----------------|---------|
| {{currentDate}} | {{author}} | Generate specification tree | Initial setup |

## AI Agent Guidelines
- Reference the relevant .specs files for context before making changes
- Update specifications before and after significant changes
- Link code changes to tasks (TASK-XXX) and requirements (REQ-XXX)
- Keep development/context.md current with architectural decisions
- **RELEASE MANDATE**: Never commit, push, tag, or publish releases without explicit user approval

## Cross-References
- Context: ./context.md
- Project config: ../project/project.yaml

---
*Last updated: {{lastUpdated}}*
"#;

pub const TESTS: &str = r#"# {{projectName}} Test Strategy

## Overview
_Describe the testing approach for {{projectName}}._

## Test Cases
| ID | Description | Type | Status |
|----|-------------|------|--------|
| TEST-001 | _Example_ | unit | not-started |

## Coverage Goals
_Target coverage and the CI job that enforces it._

## Cross-References
- Requirements: ../project/requirements.md
- Project config: ../project/project.yaml

---
*Last updated: {{lastUpdated}}*
"#;

pub const SPEC_UPDATE_TEMPLATE: &str = r#"# Spec Update Template

Standard procedure for updating the {{projectName}} specification files.

## 1. Update Front-matter
- Set `lastUpdated` to the current date
- Keep `sourceOfTruth` pointing at `project/project.yaml`

## 2. Document Changes
- Describe what was modified and why
- Reference related tasks or requirements
- Keep cross-references consistent

## 3. Log the Interaction
- Add an entry to `development/prompts.md`

## 4. Validate
- Run `specpilot validate` and fix every reported error

## Subfolder Structure
- `project/`: core configuration and requirements
- `architecture/`: system design and API
- `planning/`: roadmap and tasks
- `quality/`: testing strategy
- `development/`: docs, context and prompts

---
*Generated on {{currentDate}}*
"#;
