use crate::problem::problem::{Problem, ProblemKind, VisualKind};

/// The fixed, ordered list of toy problems.
///
/// Order matters: the session store cycles through it with next/prev. Each
/// descriptor is self-contained; `hidden_size` is only the default width, a
/// learner can resize the hidden layer per problem at runtime.
pub fn catalog() -> Vec<Problem> {
    vec![
        Problem {
            id: "xor",
            name: "XOR Classification",
            description: "Can the network learn that opposite corners belong together?",
            explanation: "Each dot has two coordinates. White dots belong to one group, \
                dark dots to another, and the groups sit in opposite corners. The \
                background color shows what the network currently predicts. A straight \
                line can never separate opposite corners, so a network without an \
                activation function will fail here.",
            input_size: 2,
            hidden_size: 8,
            output_size: 1,
            visual: VisualKind::TwoDBinary,
            kind: ProblemKind::Xor,
        },
        Problem {
            id: "addition",
            name: "Addition (0-4)",
            description: "A simple problem — no activation function needed.",
            explanation: "Each cell shows a pair of numbers to add. The bold number is \
                the network's predicted answer. Addition is straightforward: each input \
                contributes independently to the sum, so even a network with no \
                activation function can learn it.",
            input_size: 2,
            hidden_size: 8,
            // Classes 0+0=0 through 4+4=8.
            output_size: 9,
            visual: VisualKind::Grid,
            kind: ProblemKind::Addition,
        },
        Problem {
            id: "multiplication",
            name: "Multiplication (0-4)",
            description: "Harder than addition — the network needs an activation function.",
            explanation: "Same layout as addition, but now the network must learn to \
                multiply. Unlike addition, multiplication requires the inputs to \
                interact. This makes it fundamentally harder, and a network with no \
                activation function will plateau with many wrong cells.",
            input_size: 2,
            hidden_size: 16,
            // Classes 0*0=0 through 4*4=16.
            output_size: 17,
            visual: VisualKind::Grid,
            kind: ProblemKind::Multiplication,
        },
        Problem {
            id: "circle",
            name: "Circle Classification",
            description: "Can the network learn to draw a circular boundary?",
            explanation: "White dots are inside a circle, dark dots are outside. No \
                single straight line can separate a circle from its surroundings, so a \
                network without an activation function will fail here.",
            input_size: 2,
            hidden_size: 8,
            output_size: 1,
            visual: VisualKind::TwoDBinary,
            kind: ProblemKind::Circle,
        },
    ]
}
