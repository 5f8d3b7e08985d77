//! Hand-authored interview questions
//!
//! Keys are slugs: lowercase, words joined with `-`. Difficulty is one of
//! `beginner`, `intermediate`, `advanced`.

/// Questions for one (category, subcategory, difficulty) key
#[derive(Debug, Clone, Copy)]
pub struct BankEntry {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub difficulty: &'static str,
    pub questions: &'static [&'static str],
}

const fn entry(
    category: &'static str,
    subcategory: &'static str,
    difficulty: &'static str,
    questions: &'static [&'static str],
) -> BankEntry {
    BankEntry {
        category,
        subcategory,
        difficulty,
        questions,
    }
}

pub static QUESTION_BANK: &[BankEntry] = &[
    // Business
    entry("business", "marketing", "beginner", &[
        "If you had to promote a school bake sale with no budget, what would you do first?",
        "Which brand do you think markets itself really well to teenagers, and why?",
        "How would you explain what a target audience is to a younger student?",
        "Tell me about a time you convinced someone to try something new.",
    ]),
    entry("business", "marketing", "intermediate", &[
        "How would you measure whether a social media post for a local shop actually worked?",
        "Describe how you would plan a one-month campaign for a new after-school tutoring service.",
        "What is the difference between a customer's needs and their wants in a marketing plan?",
        "How would you adjust a message if the first version of an ad got no response?",
    ]),
    entry("business", "marketing", "advanced", &[
        "Walk me through how you would segment customers for a regional coffee chain launching a student discount.",
        "How would you decide between spending a small budget on paid ads or on community events?",
        "What ethical lines should a company not cross when marketing to teenagers?",
        "How would you test two competing slogans before committing to one?",
    ]),
    entry("business", "finance", "beginner", &[
        "How do you keep track of money you earn or receive?",
        "What does it mean to make a budget, and have you ever made one?",
        "Why do you think businesses care about profit and not just revenue?",
        "Tell me about a time you had to save up for something you wanted.",
    ]),
    entry("business", "finance", "intermediate", &[
        "If a small store's sales went up but its profit went down, what might explain that?",
        "How would you explain interest on a savings account to a friend?",
        "What information would you want before lending money to a new business?",
        "Describe how you would organize expenses for a school club fundraiser.",
    ]),
    entry("business", "finance", "advanced", &[
        "How would you compare two job offers with different salaries and benefits?",
        "What risks would you consider before a company takes out a loan to expand?",
        "Explain how inflation could affect a family's monthly budget.",
        "How would you build a simple forecast for next year's sales of a lemonade stand franchise?",
    ]),
    // Technology
    entry("technology", "software-development", "beginner", &[
        "What got you interested in programming or technology?",
        "Describe a small program, game or website you have made or would like to make.",
        "How do you usually figure things out when your code does not work?",
        "What is your favorite app, and what would you improve about it?",
    ]),
    entry("technology", "software-development", "intermediate", &[
        "Explain the difference between a variable and a function as if to a classmate.",
        "Tell me about a bug that took you a long time to fix and how you found it.",
        "How would you design a to-do list app so it stays easy to use as it grows?",
        "Why do developers use version control tools like Git?",
    ]),
    entry("technology", "software-development", "advanced", &[
        "How would you decide which data structure to use for storing a leaderboard?",
        "Describe how you would split a group coding project so teammates do not overwrite each other's work.",
        "What steps would you take to make a web form secure against bad input?",
        "How would you explain the trade-off between writing code quickly and writing code that is easy to maintain?",
    ]),
    entry("technology", "data-science", "beginner", &[
        "Tell me about a time you used numbers or charts to make a decision.",
        "What kinds of data do you think a music streaming app collects?",
        "How would you find out which lunch option is most popular at your school?",
        "Why can a graph sometimes be misleading?",
    ]),
    entry("technology", "data-science", "intermediate", &[
        "How would you clean up a spreadsheet where people typed their grades in different formats?",
        "What is the difference between an average and a median, and when does it matter?",
        "Describe a survey you would design to learn how students get to school.",
        "How could you tell whether two things are related or just happen together by chance?",
    ]),
    entry("technology", "data-science", "advanced", &[
        "How would you check whether a model that predicts test scores is treating all students fairly?",
        "What would you do if half the values in an important column of your data were missing?",
        "Explain overfitting using an example from everyday life.",
        "How would you present a surprising finding to people who might not want to believe it?",
    ]),
    // Healthcare
    entry("healthcare", "medicine", "beginner", &[
        "What draws you to a career in healthcare?",
        "Tell me about a time you helped someone who was not feeling well.",
        "Why do you think listening is important for doctors and nurses?",
        "How do you handle seeing someone upset or in pain?",
    ]),
    entry("healthcare", "medicine", "intermediate", &[
        "How would you explain the importance of hand-washing to a group of young children?",
        "Describe how you stay calm and focused in a stressful situation.",
        "What would you do if a patient's family member was angry at you?",
        "Why is patient privacy important, and how would you protect it as a volunteer?",
    ]),
    entry("healthcare", "medicine", "advanced", &[
        "How would you prioritize three patients who arrive at the same time with different needs?",
        "What would you do if you noticed a colleague skipping a safety step?",
        "How should a healthcare worker communicate a difficult diagnosis to a family?",
        "What role do you think technology should play in patient care?",
    ]),
    entry("healthcare", "research", "beginner", &[
        "Tell me about a science experiment you enjoyed and what you learned from it.",
        "Why is it important to repeat an experiment more than once?",
        "What health question would you most like scientists to answer?",
        "How do you keep careful notes when doing a project?",
    ]),
    entry("healthcare", "research", "intermediate", &[
        "How would you design a fair test of whether a new study method improves memory?",
        "What is a control group and why do studies need one?",
        "Describe a time your results did not match what you expected.",
        "How would you judge whether a health article online is trustworthy?",
    ]),
    entry("healthcare", "research", "advanced", &[
        "What ethical issues should researchers consider when running studies with teenagers?",
        "How would you explain a study's limitations without dismissing its results?",
        "How would you decide how many participants a study needs?",
        "Describe how you would organize a literature review on sleep and school performance.",
    ]),
    // Education
    entry("education", "tutoring", "beginner", &[
        "Tell me about a time you helped a friend or sibling learn something.",
        "What makes a teacher memorable in a good way?",
        "How would you keep a younger student interested during a lesson?",
        "What subject do you feel most confident explaining to others?",
    ]),
    entry("education", "tutoring", "intermediate", &[
        "How would you help a student who says they are just bad at math?",
        "Describe how you would explain the same idea in two different ways.",
        "How would you know whether a student actually understood your explanation?",
        "What would you do if a student kept getting distracted during tutoring?",
    ]),
    entry("education", "tutoring", "advanced", &[
        "How would you plan a series of sessions for a student preparing for a big exam in six weeks?",
        "How would you adapt your teaching for a student with a learning difference?",
        "How would you give honest feedback to a student without discouraging them?",
        "Describe how you would communicate a student's progress to their parents.",
    ]),
    entry("education", "nonprofit", "beginner", &[
        "Tell me about a volunteer activity you have done or would like to do.",
        "What cause do you care about most, and why?",
        "How would you get classmates interested in helping with a community project?",
        "What does teamwork look like when everyone is a volunteer?",
    ]),
    entry("education", "nonprofit", "intermediate", &[
        "How would you organize a donation drive at your school?",
        "What would you do if volunteers stopped showing up to an event you planned?",
        "How can a nonprofit show donors that their money made a difference?",
        "Describe how you would split tasks fairly among a group of volunteers.",
    ]),
    entry("education", "nonprofit", "advanced", &[
        "How would you decide which of two worthy community projects gets limited funding?",
        "What would you include in a short grant proposal for a youth literacy program?",
        "How would you measure the long-term impact of a mentoring program?",
        "How should a nonprofit respond publicly when a project does not go as planned?",
    ]),
    // Creative
    entry("creative", "graphic-design", "beginner", &[
        "What kind of art or design do you enjoy making?",
        "Describe a poster, logo or cover design you admire and explain why.",
        "How do you get started when you have a blank page?",
        "How do you react when someone does not like your creative work?",
    ]),
    entry("creative", "graphic-design", "intermediate", &[
        "How would you design a flyer that people can understand in three seconds?",
        "How do you choose colors and fonts for a project?",
        "Tell me about a time you changed a design based on feedback.",
        "How would you balance what a client wants with what you think looks best?",
    ]),
    entry("creative", "graphic-design", "advanced", &[
        "Walk me through how you would create a visual identity for a new school club.",
        "How would you make a design accessible to people with visual impairments?",
        "How do you manage several creative projects with different deadlines?",
        "How would you present three design options to a client and guide their decision?",
    ]),
    entry("creative", "media-production", "beginner", &[
        "What videos, podcasts or shows inspire you, and why?",
        "Have you ever filmed, edited or recorded anything? Tell me about it.",
        "What makes a short video hold your attention?",
        "How would you tell a story about your school in one minute?",
    ]),
    entry("creative", "media-production", "intermediate", &[
        "How would you plan a short documentary about a local business?",
        "What would you do if an interview you recorded had bad audio?",
        "How do you decide what to cut when editing?",
        "Describe how you would work with a team to produce a school news segment.",
    ]),
    entry("creative", "media-production", "advanced", &[
        "How would you handle getting permission to film people in a public place?",
        "What would your production schedule look like for a three-minute promotional video due in two weeks?",
        "How do you make sure a story is told fairly when people disagree?",
        "How would you measure whether your video reached its intended audience?",
    ]),
    // Math (answers may be submitted as structured steps)
    entry("math", "algebra", "beginner", &[
        "Solve 2x + 5 = 17 and explain each step.",
        "If a movie ticket costs $8, write an expression for the cost of n tickets.",
        "What is the value of 3(4 + 2) - 5? Show your work.",
        "Solve x / 4 = 9 and check your answer.",
    ]),
    entry("math", "algebra", "intermediate", &[
        "Solve the system x + y = 10 and x - y = 4, showing each step.",
        "Factor x^2 + 5x + 6 and explain how you found the factors.",
        "A phone plan costs $20 plus $0.10 per text. Write and solve an equation for a $35 bill.",
        "Solve 3(x - 2) = 2x + 7 and explain each step.",
    ]),
    entry("math", "algebra", "advanced", &[
        "Solve x^2 - 4x - 5 = 0 using the quadratic formula and explain each step.",
        "Find where the lines y = 2x + 1 and y = -x + 7 intersect.",
        "A ball's height is h = -5t^2 + 20t. When does it hit the ground? Show your work.",
        "Solve the inequality 2x - 3 > 7 and describe the solution set.",
    ]),
    entry("math", "statistics", "beginner", &[
        "Find the mean of 4, 8, 6 and 10 and explain what it tells you.",
        "What is the probability of rolling an even number on a fair six-sided die?",
        "Find the median of 3, 9, 1, 7 and 5. Show your steps.",
        "A class has 12 girls and 18 boys. What fraction of the class are girls?",
    ]),
    entry("math", "statistics", "intermediate", &[
        "Two coins are flipped. What is the probability of getting exactly one head? Show your reasoning.",
        "The mean of five numbers is 12. Four of them are 10, 14, 9 and 15. Find the fifth.",
        "Find the range and interquartile range of 2, 4, 4, 5, 7, 9, 10.",
        "A survey of 40 students found 15 walk to school. Estimate how many of 600 students walk.",
    ]),
    entry("math", "statistics", "advanced", &[
        "Two cards are drawn without replacement from a standard deck. What is the probability both are hearts?",
        "Explain, with a calculation, how one outlier changes the mean and median of 5, 6, 7, 8, 50.",
        "A test is 90% accurate and 2% of people have a condition. What is the chance a positive result is correct?",
        "Compute the standard deviation of 2, 4, 4, 4, 5, 5, 7, 9 and explain each step.",
    ]),
];

/// Generic questions per interview phase, used when no bank entry matches
pub static PHASE_QUESTIONS: [&[&str]; 5] = [
    // introduction
    &[
        "Tell me a little about yourself and what you are hoping to get from an internship.",
        "What made you interested in this field?",
        "How would your friends or teachers describe you?",
    ],
    // experience
    &[
        "Tell me about a project, job or activity you are proud of.",
        "Describe a time you worked on a team. What was your role?",
        "What is something you taught yourself outside of class?",
    ],
    // technical
    &[
        "What skill do you think would be most useful in this internship, and how have you practiced it?",
        "Walk me through how you would approach a task you have never done before.",
        "What tools, software or methods are you most comfortable using?",
    ],
    // challenges
    &[
        "Tell me about a challenge you faced and how you handled it.",
        "Describe a time you made a mistake. What did you learn?",
        "How do you manage your time when you have a lot due at once?",
    ],
    // goals
    &[
        "Where do you see yourself after high school?",
        "What do you hope to learn from this internship?",
        "Is there anything else you would like an employer to know about you?",
    ],
];
