//! Static educational text shown on the page.

pub const PAGE_TITLE: &str = "CalCS: Interactive Visualizer";
pub const HEADING: &str = "CalCS Interactive Visualizer: Limits and Derivatives";

pub const ABOUT_TITLE: &str = "\u{2139}\u{fe0f} About This Project";
pub const ABOUT: &str = "\
**CalCS** is a mathematical project focused on the fundamental concepts of **limits** and **derivatives**.

\u{1f50d} **Goals:**
- Create interactive tools and visualizations to explore calculus.
- Provide step-by-step animations to show the transition from secants to tangents.
- Include problems and real-world applications to reinforce learning.

\u{1f4a1} Designed for students to learn visually and interactively.";

/// One of the explanations under "Learn the Concepts".
#[derive(Debug, Clone, Copy)]
pub struct Concept {
  pub title: &'static str,
  pub intro: &'static str,
  pub formula: Option<&'static str>,
  pub note: &'static str,
}

/// A practice problem with a canned solution, one LaTeX line per
/// step.
#[derive(Debug, Clone, Copy)]
pub struct Problem {
  pub title: &'static str,
  pub statement: &'static str,
  pub solution: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct Application {
  pub title: &'static str,
  pub intro: &'static str,
  pub steps: &'static [(&'static str, &'static str)],
  pub conclusion: &'static str,
}

pub const CONCEPTS: [Concept; 3] = [
  Concept {
    title: "\u{1f539} What is a Limit?",
    intro: "A **limit** helps us understand how a function behaves as the input value gets close to a \
            specific point, even if the function isn't defined at that exact point.\n\nFor example:",
    formula: Some(r"\lim_{x \to 2} x^2 = 4"),
    note: "> **Why it matters:** Limits are the foundation of calculus and help define both derivatives \
           and continuity.",
  },
  Concept {
    title: "\u{1f539} What is a Derivative?",
    intro: "A **derivative** tells us how a function is changing **at a specific point**. It's the \
            **instantaneous rate of change** or the slope of the curve at that point.\n\n\
            It's defined using a limit:",
    formula: Some(r"f'(a) = \lim_{h \to 0} \frac{f(a+h) - f(a)}{h}"),
    note: "> **In simple terms:** The derivative tells us how steep the function is at a particular x-value.",
  },
  Concept {
    title: "\u{1f539} From Secant to Tangent",
    intro: "A **secant line** connects two points on a curve. As the two points get closer, the secant \
            line turns into a **tangent line**, which just touches the curve at one point.\n\n\
            This transition illustrates how we use limits to define a **tangent line**, which is exactly \
            what a derivative represents.",
    formula: None,
    note: "> **Key idea:** The derivative is the slope of the tangent, and the tangent is the \"limit\" of \
           secant lines as the two points converge.",
  },
];

pub const PROBLEMS: [Problem; 5] = [
  Problem {
    title: "\u{1f9e0} Try This: Derivative at a Point",
    statement: r"Find the derivative of \( f(x) = x^2 + 3x \) at \( x = 2 \)",
    solution: &[
      r"f'(x) = 2x + 3",
      r"f'(2) = 2(2) + 3 = 7",
    ],
  },
  Problem {
    title: "\u{1f9e0} Try This: Limit at a Point",
    statement: r"Evaluate \( \lim_{x \to 1} \frac{x^2 - 1}{x - 1} \)",
    solution: &[
      r"= \lim_{x \to 1} \frac{(x - 1)(x + 1)}{x - 1} = \lim_{x \to 1} x + 1 = 2",
    ],
  },
  Problem {
    title: "\u{1f9e0} Try This: One-Sided Limit",
    statement: r"Evaluate the left-hand limit \( \lim_{x \to 0^-} \frac{|x|}{x} \)",
    solution: &[
      r"\lim_{x \to 0^-} \frac{-x}{x} = -1",
    ],
  },
  Problem {
    title: "\u{1f9e0} Try This: Power Rule",
    statement: r"Find the derivative of \( f(x) = 4x^3 - 2x^2 + x - 7 \)",
    solution: &[
      r"f'(x) = 12x^2 - 4x + 1",
    ],
  },
  Problem {
    title: "\u{1f9e0} Try This: Tangent Line Equation",
    statement: r"Find the equation of the tangent line to \( f(x) = x^2 \) at \( x = 3 \)",
    solution: &[
      r"f'(x) = 2x \Rightarrow f'(3) = 6",
      r"\text{Point: } (3, 9), \text{ Slope: } 6",
      r"\text{Tangent Line: } y - 9 = 6(x - 3) \Rightarrow y = 6x - 9",
    ],
  },
];

pub const APPLICATION: Application = Application {
  title: "\u{1f697} Velocity of a Moving Car",
  intro: r"Suppose the position of a car is given by \( s(t) = 5t^2 \).",
  steps: &[
    ("The velocity is the derivative of position:", r"v(t) = s'(t) = 10t"),
    (r"At \( t = 3 \) seconds, the car is moving at:", r"v(3) = 30 \text{ m/s}"),
  ],
  conclusion: "This shows how derivatives represent real-world rates of change.",
};
