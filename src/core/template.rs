//! Static sections of the snapshot document. None of this text is derived from
//! the scanned tree.

pub const TITLE: &str = "# ClauseGuard - Project Snapshot";

pub const USAGE_NOTE: &str = "> **Usage**: Copy this file into the Claude project memory";

pub const PROJECT_CONTEXT: &[&str] = &[
    "## 📋 Project Context",
    "",
    "**ClauseGuard** - AI contract analysis SaaS for French-speaking freelancers and small businesses.",
    "",
    "### Stack",
    "- Frontend: Next.js 16 + TypeScript + Tailwind CSS v3 + shadcn/ui + Framer Motion",
    "- Backend: Next.js API Routes",
    "- AI: Claude API (Sonnet)",
    "- Auth & DB: Supabase",
    "- Payments: Stripe",
    "- Hosting: Vercel",
    "",
    "### Pricing",
    "- Discovery: €12/month (3 analyses)",
    "- Pro: €19/month (10 analyses)",
    "- Unlimited: €29/month",
];

pub const STRUCTURE_HEADING: &str = "## 📁 Project structure";

pub const ROOT_LABEL: &str = "clauseguard";

// Placeholder values only. Never read from a real env file.
pub const ENV_TEMPLATE: &[&str] = &[
    "## 🔐 Environment variables (.env.local)",
    "",
    "```env",
    "# Supabase",
    "NEXT_PUBLIC_SUPABASE_URL=https://xxxxx.supabase.co",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY=eyJxxxxx",
    "SUPABASE_SERVICE_ROLE_KEY=eyJxxxxx",
    "",
    "# Anthropic",
    "ANTHROPIC_API_KEY=sk-ant-xxxxx",
    "",
    "# Stripe",
    "NEXT_PUBLIC_STRIPE_PUBLISHABLE_KEY=pk_test_xxxxx",
    "STRIPE_SECRET_KEY=sk_test_xxxxx",
    "STRIPE_WEBHOOK_SECRET=whsec_xxxxx",
    "STRIPE_PRICE_DISCOVERY=price_xxxxx",
    "STRIPE_PRICE_PRO=price_xxxxx",
    "STRIPE_PRICE_UNLIMITED=price_xxxxx",
    "",
    "# App",
    "NEXT_PUBLIC_APP_URL=http://localhost:3000",
    "```",
];

pub const FILES_HEADING: &str = "## 📄 Project files";

pub const FOOTER: &[&str] = &[
    "## ✅ Implemented features",
    "",
    "- [x] PDF/DOCX upload",
    "- [x] Text extraction (unpdf + mammoth)",
    "- [x] Claude API analysis (15 clause types)",
    "- [x] Supabase authentication",
    "- [x] Analyses saved to the database",
    "- [x] Dashboard with history",
    "- [x] Analysis detail page",
    "- [x] Framer Motion animations",
    "- [x] Protected routes (middleware)",
    "- [x] Per-plan quotas",
    "- [x] Stripe Checkout",
    "",
    "## 🔧 To do",
    "",
    "- [ ] Stripe webhook (production)",
    "- [ ] PDF report export",
    "- [ ] Vercel deployment",
    "- [ ] Beta testing",
];

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y at %H:%M";
